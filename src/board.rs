use std::fmt::{Display, Formatter};

use crate::error::FenError;
use crate::history::HistoryEntry;
use crate::move_generator::{generate, generate_for};
use crate::movelist::MoveList;
use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::{self, file_of, rank_of, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

type Squares = [Option<Piece>; 64];

/// An 8x8 position along with the turn, the move counters and an undo stack.
/// Cloning a board yields a fully independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pieces: Squares,
    side_to_move: Color,
    move_count: u32,
    half_move_clock: u32,

    history_entries: Vec<HistoryEntry>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    InProgress,
}
impl Outcome {
    pub fn is_over(&self) -> bool {
        *self != Outcome::InProgress
    }
}
impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
            Outcome::Draw(DrawReason::FiftyMoveRule) => write!(f, "draw by the fifty-move rule"),
            Outcome::Draw(DrawReason::ThreefoldRepetition) => write!(f, "draw by repetition"),
            Outcome::InProgress => write!(f, "in progress"),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Creates a board set up in the standard starting position
    pub fn new() -> Board {
        let mut b = Board::empty();
        b.reset();
        b
    }

    /// Creates a board with no pieces on it, White to move
    pub fn empty() -> Board {
        Board {
            pieces: [None; 64],
            side_to_move: White,
            move_count: 1,
            half_move_clock: 0,

            history_entries: Vec::with_capacity(128),
        }
    }

    /// Puts every piece back on its starting square and clears the history
    pub fn reset(&mut self) {
        const BACK_RANK: [PieceType; 8] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        self.pieces = [None; 64];
        for (col, piece_type) in BACK_RANK.iter().enumerate() {
            self.pieces[square::from_coords(0, col)] = Some(Piece::new(*piece_type, White));
            self.pieces[square::from_coords(1, col)] = Some(Piece::new(Pawn, White));
            self.pieces[square::from_coords(6, col)] = Some(Piece::new(Pawn, Black));
            self.pieces[square::from_coords(7, col)] = Some(Piece::new(*piece_type, Black));
        }
        self.side_to_move = White;
        self.move_count = 1;
        self.half_move_clock = 0;
        self.history_entries.clear();
    }

    /// Makes a move on the board.
    /// The move is expected to be legal, use `is_valid_move` beforehand when unsure.
    /// A move from an empty square is a caller bug: debug builds panic on it, release
    /// builds leave the board as it was, recording nothing and keeping the turn.
    pub fn make(&mut self, mv: Move) {
        let (origin, target) = (mv.origin(), mv.target());
        debug_assert!(self.pieces[origin].is_some(), "no piece to play {}", mv);
        let Some(moved_piece) = self.pieces[origin].take() else {
            return;
        };
        let captured_piece = self.pieces[target].replace(moved_piece);

        self.history_entries.push(HistoryEntry {
            move_played: mv,
            captured_piece,
            half_move_clock: self.half_move_clock,
            move_count: self.move_count,
        });

        if self.side_to_move == Black {
            self.move_count += 1;
        }
        if moved_piece.piece_type == Pawn || captured_piece.is_some() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Unmakes the move on the top of the history stack, returning it.
    /// Returns None, leaving the board untouched, when there is nothing to undo.
    pub fn unmake(&mut self) -> Option<Move> {
        let entry = self.history_entries.pop()?;
        let mv = entry.move_played;

        self.pieces[mv.origin()] = self.pieces[mv.target()].take();
        self.pieces[mv.target()] = entry.captured_piece;
        self.side_to_move = self.side_to_move.opposite();
        self.move_count = entry.move_count;
        self.half_move_clock = entry.half_move_clock;
        Some(mv)
    }

    /*
    LEGALITY
     */

    /// Checks that the side to move may play `mv`
    pub fn is_valid_move(&self, mv: Move) -> bool {
        self.is_legal_for(mv, self.side_to_move)
    }

    /// Checks that `color` could play `mv` in this position, whoever's turn it is
    pub fn is_legal_for(&self, mv: Move, color: Color) -> bool {
        match self.pieces[mv.origin()] {
            Some(p) if p.color == color => (),
            _ => return false,
        }
        if !attacks(&self.pieces, mv.origin(), mv.target()) {
            return false;
        }

        let mut after = self.pieces;
        after[mv.target()] = after[mv.origin()].take();
        !king_attacked(&after, color)
    }

    /// Every legal move of the side to move
    pub fn legal_moves(&self) -> MoveList {
        generate(self)
    }

    /// A missing king is never in check
    pub fn in_check(&self, side: Color) -> bool {
        king_attacked(&self.pieces, side)
    }

    pub fn is_checkmate(&self, player: Color) -> bool {
        self.in_check(player) && generate_for(self, player).is_empty()
    }

    pub fn is_stalemate(&self, player: Color) -> bool {
        !self.in_check(player) && generate_for(self, player).is_empty()
    }

    /*
    DRAWS
     */
    pub fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.fifty_move_draw() {
            Some(DrawReason::FiftyMoveRule)
        } else if self.threefold_repetition() {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }

    /// No pawns, rooks nor queens, and at most one minor piece a side
    pub fn insufficient_material(&self) -> bool {
        let mut minors = [0u32; 2];
        for (_, piece) in self.occupied() {
            match piece.piece_type {
                King => (),
                t if t.is_minor() => minors[piece.color as usize] += 1,
                _ => return false,
            }
        }
        minors.iter().all(|&count| count <= 1)
    }

    pub fn fifty_move_draw(&self) -> bool {
        self.half_move_clock >= 100
    }

    /// Positions are not remembered, so repetitions are never detected
    pub fn threefold_repetition(&self) -> bool {
        false
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_over()
    }

    /// Classifies the position from the point of view of the side to move
    pub fn outcome(&self) -> Outcome {
        if self.legal_moves().is_empty() {
            return if self.in_check(self.side_to_move) {
                Outcome::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                Outcome::Stalemate
            };
        }
        match self.draw_reason() {
            Some(reason) => Outcome::Draw(reason),
            None => Outcome::InProgress,
        }
    }

    /*
    INTERESTING GETTERS
     */
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.pieces[sq]
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.pieces[square::from_coords(row, col)]
    }

    /// Iterates over every occupied square along with its piece
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(sq, p)| p.map(|p| (sq, p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        find_king(&self.pieces, color)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history_entries
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history_entries.last().map(|h| h.move_played)
    }

    /// Pieces taken so far, index-aligned with `history`
    pub fn captured_pieces(&self) -> impl Iterator<Item = Option<Piece>> + '_ {
        self.history_entries.iter().map(|h| h.captured_piece)
    }

    /*
    FEN STRING OPERATIONS
     */

    /// Loads a position. The castling and en passant fields are read but ignored,
    /// missing counters default to a fresh game.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let mut sections = fen.split_whitespace();
        let placement = sections.next().ok_or(FenError::Empty)?;
        let side = sections.next().unwrap_or("w");
        let _castling = sections.next();
        let _ep_target = sections.next();
        let half_move_clock = parse_counter(sections.next(), "half-move", 0)?;
        let move_count = parse_counter(sections.next(), "full-move", 1)?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut b = Board::empty();
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece(c))?;
                    if file >= 8 {
                        return Err(FenError::RankWidth { rank: rank + 1 });
                    }
                    b.pieces[square::from_coords(rank, file)] = Some(piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: rank + 1 });
            }
        }

        b.side_to_move = match side {
            "w" => White,
            "b" => Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };
        for color in [White, Black] {
            check_material(&b.pieces, color)?;
        }
        b.half_move_clock = half_move_clock;
        b.move_count = move_count;
        Ok(b)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_counter = 0;
            for file in 0..8 {
                match self.pieces[square::from_coords(rank, file)] {
                    Some(p) => {
                        if empty_counter != 0 {
                            fen.push_str(&empty_counter.to_string())
                        }
                        empty_counter = 0;
                        fen.push_str(&p.to_string())
                    }
                    None => empty_counter += 1,
                }
            }
            if empty_counter != 0 {
                fen.push_str(&empty_counter.to_string())
            }
            if rank != 0 {
                fen.push('/');
            }
        }

        fen.push_str(if self.side_to_move == White { " w " } else { " b " });
        fen.push_str("- - ");
        fen.push_str(&(self.half_move_clock.to_string() + " "));
        fen.push_str(&self.move_count.to_string());
        fen
    }
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse::<u32>().map_err(|_| FenError::Counter {
            field: name,
            value: s.to_string(),
        }),
    }
}

/// One king and at most 16 pieces a side, which keeps every position
/// within the capacity of a `MoveList`
fn check_material(pieces: &Squares, color: Color) -> Result<(), FenError> {
    let owned = pieces.iter().flatten().filter(|p| p.color == color);
    let count = owned.clone().count();
    if count > 16 {
        return Err(FenError::TooManyPieces {
            color: color.name(),
            count,
        });
    }
    let kings = owned.filter(|p| p.piece_type == King).count();
    if kings != 1 {
        return Err(FenError::KingCount {
            color: color.name(),
            count: kings,
        });
    }
    Ok(())
}

fn find_king(pieces: &Squares, color: Color) -> Option<Square> {
    pieces
        .iter()
        .position(|p| *p == Some(Piece::new(King, color)))
}

/// Checks the movement shape of the piece standing on `origin` towards `target`,
/// as well as the path for sliders and the destination occupancy.
/// Whether the move exposes its own king is not looked at.
fn attacks(pieces: &Squares, origin: Square, target: Square) -> bool {
    let Some(piece) = pieces[origin] else {
        return false;
    };
    if let Some(occupant) = pieces[target] {
        if occupant.color == piece.color {
            return false;
        }
    }

    let d_row = (rank_of(target) as isize - rank_of(origin) as isize).abs();
    let d_col = (file_of(target) as isize - file_of(origin) as isize).abs();
    match piece.piece_type {
        Pawn => pawn_shape(pieces, piece.color, origin, target),
        Knight => (d_row, d_col) == (2, 1) || (d_row, d_col) == (1, 2),
        Bishop | Rook | Queen => {
            let diagonal = piece.piece_type.is_bishop_like() && d_row == d_col;
            let straight = piece.piece_type.is_rook_like() && (d_row == 0 || d_col == 0);
            (diagonal || straight) && clear_path(pieces, origin, target)
        }
        King => d_row <= 1 && d_col <= 1,
    }
}

fn pawn_shape(pieces: &Squares, color: Color, origin: Square, target: Square) -> bool {
    let direction = color.forward();
    let row_step = rank_of(target) as isize - rank_of(origin) as isize;
    let col_step = file_of(target) as isize - file_of(origin) as isize;

    if col_step == 0 {
        if row_step == direction {
            return pieces[target].is_none();
        }
        if rank_of(origin) == color.pawn_row() && row_step == 2 * direction {
            let skipped = square::offset(origin, direction, 0);
            return skipped.map_or(false, |sq| pieces[sq].is_none()) && pieces[target].is_none();
        }
        false
    } else if col_step.abs() == 1 && row_step == direction {
        matches!(pieces[target], Some(p) if p.color != color)
    } else {
        false
    }
}

/// Every square strictly between origin and target is empty.
/// Only meaningful for straight or diagonal lines.
fn clear_path(pieces: &Squares, origin: Square, target: Square) -> bool {
    let row_step = (rank_of(target) as isize - rank_of(origin) as isize).signum();
    let col_step = (file_of(target) as isize - file_of(origin) as isize).signum();

    let mut current = origin;
    while let Some(sq) = square::offset(current, row_step, col_step) {
        if sq == target {
            return true;
        }
        if pieces[sq].is_some() {
            return false;
        }
        current = sq;
    }
    true
}

fn king_attacked(pieces: &Squares, side: Color) -> bool {
    let Some(king) = find_king(pieces, side) else {
        return false;
    };
    pieces.iter().enumerate().any(|(sq, p)| match p {
        Some(p) if p.color != side => attacks(pieces, sq, king),
        _ => false,
    })
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut ranks: Vec<String> = vec![];
        for rank in (0..8).rev() {
            let mut line = format!("{} ", rank + 1);
            for file in 0..8 {
                match self.pieces[square::from_coords(rank, file)] {
                    None => line.push_str(". "),
                    Some(p) => line.push_str(&(p.to_string() + " ")),
                }
            }
            ranks.push(line);
        }

        let mut ranks_iter = ranks.iter();
        let mut next_rank = || ranks_iter.next().map(String::as_str).unwrap_or_default();
        writeln!(f, "{}", next_rank())?;
        writeln!(f, "{}  side to move: {}", next_rank(), self.side_to_move)?;
        writeln!(f, "{}  move: {}", next_rank(), self.move_count)?;
        writeln!(f, "{}  half-move clock: {}", next_rank(), self.half_move_clock)?;
        writeln!(
            f,
            "{}  last move: {}",
            next_rank(),
            self.last_move().map_or_else(|| String::from("-"), |m| m.to_string())
        )?;
        writeln!(f, "{}  fen: {}", next_rank(), self.fen())?;
        writeln!(f, "{}", next_rank())?;
        writeln!(f, "{}", next_rank())?;
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        Move::parse(s).unwrap()
    }

    #[test]
    fn starting_position() {
        let board = Board::new();
        assert_eq!(board.fen(), STARTING_FEN);
        assert_eq!(board.side_to_move(), White);
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.half_move_clock(), 0);
        assert_eq!(board.piece_at(0, 4), Some(Piece::new(King, White)));
        assert_eq!(board.piece_at(7, 3), Some(Piece::new(Queen, Black)));
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn fen_round_trip() {
        for fen in [
            STARTING_FEN,
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - - 2 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "7k/8/6Q1/8/8/8/8/K7 b - - 41 77",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().fen(), fen);
        }
    }

    #[test]
    fn fen_castling_and_counters_are_optional() {
        let b = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3").unwrap();
        assert_eq!(b.side_to_move(), Black);
        assert_eq!(b.half_move_clock(), 0);
        assert_eq!(b.move_count(), 1);
    }

    #[test]
    fn fen_errors() {
        assert_eq!(Board::from_fen(""), Err(FenError::Empty));
        assert_eq!(Board::from_fen("8/8/8 w"), Err(FenError::RankCount(3)));
        assert_eq!(
            Board::from_fen("9/8/8/8/8/8/8/8 w"),
            Err(FenError::RankWidth { rank: 8 })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/7 w"),
            Err(FenError::RankWidth { rank: 1 })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/7x w"),
            Err(FenError::UnknownPiece('x'))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 x"),
            Err(FenError::SideToMove(String::from("x")))
        );
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - many 1"),
            Err(FenError::Counter { field: "half-move", .. })
        ));
    }

    #[test]
    fn make_unmake_restores_everything() {
        let mut board =
            Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - - 2 3")
                .unwrap();
        let before = board.clone();
        for m in &board.legal_moves() {
            let mut copy = board.clone();
            copy.make(*m);
            assert_ne!(copy.side_to_move(), before.side_to_move());
            assert_eq!(copy.unmake(), Some(*m));
            assert_eq!(copy, before);
        }

        // A capture by black bumps the move counter and resets the clock
        board.make(mv("f3e5"));
        board.make(mv("c6e5"));
        assert_eq!(board.half_move_clock(), 0);
        assert_eq!(board.move_count(), 4);
        assert_eq!(board.captured_pieces().count(), board.history().len());
        board.unmake();
        board.unmake();
        assert_eq!(board, before);
    }

    #[test]
    fn unmake_on_empty_history() {
        let mut board = Board::new();
        assert_eq!(board.unmake(), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn counters() {
        let mut board = Board::new();
        board.make(mv("g1f3"));
        assert_eq!((board.half_move_clock(), board.move_count()), (1, 1));
        board.make(mv("g8f6"));
        assert_eq!((board.half_move_clock(), board.move_count()), (2, 2));
        board.make(mv("e2e4"));
        assert_eq!((board.half_move_clock(), board.move_count()), (0, 2));
        assert_eq!(board.side_to_move(), Black);
    }

    #[test]
    fn piece_shapes() {
        let board = Board::new();
        assert!(board.is_valid_move(mv("e2e4")));
        assert!(board.is_valid_move(mv("e2e3")));
        assert!(!board.is_valid_move(mv("e2e5")));
        assert!(!board.is_valid_move(mv("e2d3")));
        assert!(board.is_valid_move(mv("b1c3")));
        assert!(!board.is_valid_move(mv("b1d2")));
        assert!(!board.is_valid_move(mv("f1c4")));
        assert!(!board.is_valid_move(mv("e7e5")));
        assert!(!board.is_valid_move(mv("e4e5")));

        let open = Board::from_fen("4k3/8/8/3p4/8/8/8/R2QKB1N w - - 0 1").unwrap();
        assert!(open.is_valid_move(mv("a1a8")));
        assert!(open.is_valid_move(mv("d1d5")));
        assert!(!open.is_valid_move(mv("d1d6")));
        assert!(open.is_valid_move(mv("d1h5")));
        assert!(open.is_valid_move(mv("f1a6")));
        assert!(open.is_valid_move(mv("h1g3")));
        assert!(!open.is_valid_move(mv("h1h3")));
        assert!(!open.is_valid_move(mv("a1d1")));
        assert!(!open.is_valid_move(mv("e1e1")));
    }

    #[test]
    fn pawn_double_push_needs_both_squares() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(!board.is_valid_move(mv("e2e3")));
        assert!(!board.is_valid_move(mv("e2e4")));
        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(board.is_valid_move(mv("e2e3")));
        assert!(!board.is_valid_move(mv("e2e4")));
    }

    #[test]
    fn black_pawns_move_down() {
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b - - 0 1").unwrap();
        assert!(board.is_valid_move(mv("e7e5")));
        assert!(board.is_valid_move(mv("e7e6")));
        assert!(!board.is_valid_move(mv("e7e8")));
        let board = Board::from_fen("4k3/8/8/4p3/3P4/8/8/4K3 b - - 0 1").unwrap();
        assert!(board.is_valid_move(mv("e5d4")));
        assert!(!board.is_valid_move(mv("e5f4")));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let board = Board::from_fen("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(!board.is_valid_move(mv("e2d3")));
        assert!(!board.is_valid_move(mv("e2f1")));
        assert!(board.is_valid_move(mv("e1d2")));
        assert!(!board
            .legal_moves()
            .iter()
            .any(|m| m.origin() == square::parse_square("e2").unwrap()));
    }

    #[test]
    fn king_may_not_walk_into_check() {
        let board = Board::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        assert!(!board.in_check(White));
        assert!(board.is_valid_move(mv("e1d2")));
        assert!(!board.is_valid_move(mv("e1e2")));
        assert!(!board.is_valid_move(mv("e1d1")));
        assert!(board.is_valid_move(mv("e1f1")));
    }

    #[test]
    fn check_detection() {
        let board = Board::from_fen("4k3/8/8/b7/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.in_check(White));
        assert!(!board.in_check(Black));
        // Pawns only attack diagonally
        let board = Board::from_fen("8/8/8/8/8/4k3/4P3/4K3 b - - 0 1").unwrap();
        assert!(!board.in_check(Black));
        let board = Board::from_fen("8/8/8/8/8/3k4/4P3/4K3 b - - 0 1").unwrap();
        assert!(board.in_check(Black));
        // Blocked sliders do not give check
        let board = Board::from_fen("4k3/4p3/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        assert!(!board.in_check(Black));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let board = Board::empty();
        assert_eq!(board.king_square(Black), None);
        assert!(!board.in_check(Black));
        assert!(!board.is_checkmate(Black));
        assert!(!board.in_check(White));
    }

    #[test]
    fn fen_material_must_be_playable() {
        assert_eq!(
            Board::from_fen("QQQQQQQB/Q6Q/Q6Q/Q6Q/Q6Q/Q5kQ/Q6Q/KQQQQQQQ w - - 0 1"),
            Err(FenError::TooManyPieces {
                color: "White",
                count: 28
            })
        );
        assert_eq!(
            Board::from_fen("QQQQQQQB/Q6Q/Q6Q/Q6Q/Q6Q/Q6Q/Q6Q/KQQQQQQQ w - - 0 1"),
            Err(FenError::TooManyPieces {
                color: "White",
                count: 28
            })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/R6K b - - 0 1"),
            Err(FenError::KingCount {
                color: "Black",
                count: 0
            })
        );
        assert_eq!(
            Board::from_fen("k7/8/8/8/8/8/8/K6K w - - 0 1"),
            Err(FenError::KingCount {
                color: "White",
                count: 2
            })
        );
        let crowded =
            Board::from_fen("kqqqqqqq/qqqqqqqq/8/8/8/8/QQQQQQQQ/QQQQQQQK w - - 0 1").unwrap();
        assert!(!crowded.legal_moves().is_empty());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "no piece to play"))]
    fn playing_from_an_empty_square_changes_nothing() {
        let mut board = Board::new();
        board.make(mv("e4e5"));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn fools_mate() {
        let mut board = Board::new();
        for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert!(board.is_valid_move(mv(m)), "{} should be legal", m);
            board.make(mv(m));
        }
        assert!(board.in_check(White));
        assert!(board.is_checkmate(White));
        assert!(!board.is_stalemate(White));
        assert!(!board.is_checkmate(Black));
        assert!(board.legal_moves().is_empty());
        assert!(board.is_game_over());
        assert_eq!(board.outcome(), Outcome::Checkmate { winner: Black });
    }

    #[test]
    fn cornered_king_stalemate() {
        let board = Board::from_fen("7k/8/6Q1/8/8/8/8/K7 b - - 0 1").unwrap();
        assert!(!board.in_check(Black));
        assert!(board.is_stalemate(Black));
        assert!(!board.is_checkmate(Black));
        assert!(board.is_game_over());
        assert_eq!(board.outcome(), Outcome::Stalemate);
    }

    #[test]
    fn bare_kings_are_drawn() {
        for fen in ["4k3/8/8/8/8/8/8/4K3 w - - 0 1", "4k3/8/8/8/8/8/8/4K3 b - - 0 1"] {
            let board = Board::from_fen(fen).unwrap();
            assert!(board.is_draw());
            assert!(board.is_game_over());
            assert_eq!(
                board.outcome(),
                Outcome::Draw(DrawReason::InsufficientMaterial)
            );
        }
    }

    #[test]
    fn insufficient_material() {
        let minor_each = Board::from_fen("4kb2/8/8/8/8/8/8/1N2K3 w - - 0 1").unwrap();
        assert!(minor_each.insufficient_material());
        let two_knights = Board::from_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1").unwrap();
        assert!(!two_knights.insufficient_material());
        let rook = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(!rook.insufficient_material());
        let pawn = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(!pawn.insufficient_material());
    }

    #[test]
    fn fifty_move_rule() {
        let board = Board::from_fen("r3k3/8/8/8/8/8/8/R3K2Q w - - 99 80").unwrap();
        assert!(!board.is_draw());
        let mut board = board;
        board.make(mv("h1h2"));
        assert_eq!(board.half_move_clock(), 100);
        assert!(board.is_draw());
        assert_eq!(board.outcome(), Outcome::Draw(DrawReason::FiftyMoveRule));
        assert!(!board.threefold_repetition());
    }

    #[test]
    fn legal_moves_never_expose_the_king() {
        let mut board = Board::new();
        for m in ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6"] {
            board.make(mv(m));
            for candidate in &board.legal_moves() {
                let mut after = board.clone();
                let mover = after.side_to_move();
                after.make(*candidate);
                assert!(!after.in_check(mover), "{} exposes the king", candidate);
            }
        }
    }

    #[test]
    fn clones_are_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        copy.make(mv("e2e4"));
        copy.make(mv("e7e5"));
        copy.make(mv("g1f3"));
        assert_eq!(board.piece_at(1, 4), Some(Piece::new(PieceType::Pawn, White)));
        assert_eq!(board.piece_at(0, 6), Some(Piece::new(Knight, White)));
        assert!(board.history().is_empty());
    }
}
