use crate::board::{Board, Outcome};
use crate::move_generator::generate;
use crate::movelist::MoveList;
use crate::piece::Color::{self, Black, White};
use crate::piece::PieceType;
use crate::square::{self, file_of, vertical_symmetry};

pub type Score = i32;

// One table per piece type, from White's point of view: the first line is the first rank.
// Black reads them through the vertically mirrored square.
#[rustfmt::skip]
const PIECE_SQUARE_TABLE: [[Score; 64]; 6] = [
    // Pawn
    [
          0,   0,   0,   0,   0,   0,   0,   0,
          5,  10,  10, -20, -20,  10,  10,   5,
          5,  -5, -10,   0,   0, -10,  -5,   5,
          0,   0,   0,  20,  20,   0,   0,   0,
          5,   5,  10,  25,  25,  10,   5,   5,
         10,  10,  20,  30,  30,  20,  10,  10,
         50,  50,  50,  50,  50,  50,  50,  50,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50,
        -40, -20,   0,   5,   5,   0, -20, -40,
        -30,   5,  10,  15,  15,  10,   5, -30,
        -30,   0,  15,  20,  20,  15,   0, -30,
        -30,   5,  15,  20,  20,  15,   5, -30,
        -30,   0,  10,  15,  15,  10,   0, -30,
        -40, -20,   0,   0,   0,   0, -20, -40,
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20,
        -10,   5,   0,   0,   0,   0,   5, -10,
        -10,  10,  10,  10,  10,  10,  10, -10,
        -10,   0,  10,  10,  10,  10,   0, -10,
        -10,   5,   5,  10,  10,   5,   5, -10,
        -10,   0,   5,  10,  10,   5,   0, -10,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
          0,   0,   0,   5,   5,   0,   0,   0,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
          5,  10,  10,  10,  10,  10,  10,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Queen
    [
        -20, -10, -10,  -5,  -5, -10, -10, -20,
        -10,   0,   5,   0,   0,   0,   0, -10,
        -10,   5,   5,   5,   5,   5,   0, -10,
          0,   0,   5,   5,   5,   5,   0,  -5,
         -5,   0,   5,   5,   5,   5,   0,  -5,
        -10,   0,   5,   5,   5,   5,   0, -10,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King
    [
         20,  30,  10,   0,   0,  10,  30,  20,
         20,  20,   0,   0,   0,   0,  20,  20,
        -10, -20, -20, -20, -20, -20, -20, -10,
        -20, -30, -30, -40, -40, -30, -30, -20,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
    ],
];

const KING_NEIGHBOURHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A static evaluation, positive scores favouring White.
/// Terms are kept separately so that they can be inspected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: Score,
    pub material: Score,
    pub positional: Score,
    pub pawn_structure: Score,
    pub mobility: Score,
    pub king_safety: Score,
    pub outcome: Outcome,
}
impl Evaluation {
    pub const MATE_SCORE: Score = 10000;
    pub const DRAW_SCORE: Score = 0;
    pub const MOBILITY_WEIGHT: Score = 5;

    /// Evaluates a position, finished games being scored by their result alone
    pub fn evaluate(board: &Board) -> Evaluation {
        let moves = generate(board);
        if let Some((score, outcome)) = Self::terminal(board, &moves) {
            return Evaluation {
                score,
                material: 0,
                positional: 0,
                pawn_structure: 0,
                mobility: 0,
                king_safety: 0,
                outcome,
            };
        }

        let material = Self::material(board);
        let positional = Self::positional(board);
        let pawn_structure = Self::pawn_structure(board);
        let mobility = Self::mobility_of(board, &moves);
        let king_safety = Self::king_safety(board);
        Evaluation {
            score: material + positional + pawn_structure + mobility + king_safety,
            material,
            positional,
            pawn_structure,
            mobility,
            king_safety,
            outcome: Outcome::InProgress,
        }
    }

    pub fn score(board: &Board) -> Score {
        Self::evaluate(board).score
    }

    fn terminal(board: &Board, moves: &MoveList) -> Option<(Score, Outcome)> {
        let side = board.side_to_move();
        for (color, score) in [(White, -Self::MATE_SCORE), (Black, Self::MATE_SCORE)] {
            // The side to move's replies are already known
            let mated = if color == side {
                moves.is_empty() && board.in_check(color)
            } else {
                board.is_checkmate(color)
            };
            if mated {
                return Some((
                    score,
                    Outcome::Checkmate {
                        winner: color.opposite(),
                    },
                ));
            }
        }
        if moves.is_empty() {
            return Some((Self::DRAW_SCORE, Outcome::Stalemate));
        }
        board
            .draw_reason()
            .map(|reason| (Self::DRAW_SCORE, Outcome::Draw(reason)))
    }

    /// White material minus Black material
    pub fn material(board: &Board) -> Score {
        board
            .occupied()
            .map(|(_, p)| signed(p.color, p.piece_type.value()))
            .sum()
    }

    /// Piece-square table balance
    pub fn positional(board: &Board) -> Score {
        board
            .occupied()
            .map(|(sq, p)| signed(p.color, Self::table_value(p.piece_type, p.color, sq)))
            .sum()
    }

    pub fn table_value(piece_type: PieceType, color: Color, sq: usize) -> Score {
        let index = if color == White {
            sq
        } else {
            vertical_symmetry(sq)
        };
        PIECE_SQUARE_TABLE[piece_type as usize][index]
    }

    /// Files holding pawns cost 10 to their owner, files lacking them cost 20
    pub fn pawn_structure(board: &Board) -> Score {
        let mut score = 0;
        for col in 0..8 {
            let mut has_pawn = [false; 2];
            for row in 0..8 {
                if let Some(p) = board.piece_at(row, col) {
                    if p.piece_type == PieceType::Pawn {
                        has_pawn[p.color as usize] = true;
                    }
                }
            }
            let (white, black) = (has_pawn[White as usize], has_pawn[Black as usize]);
            if white {
                score -= 10;
            }
            if black {
                score += 10;
            }
            if !white {
                score -= 20;
            }
            if !black {
                score += 20;
            }
        }
        score
    }

    /// Legal moves available to each piece. Only the side to move has any.
    pub fn mobility(board: &Board) -> Score {
        Self::mobility_of(board, &generate(board))
    }

    fn mobility_of(board: &Board, moves: &MoveList) -> Score {
        board
            .occupied()
            .map(|(sq, p)| {
                let count = moves.from_square(sq).count() as Score;
                signed(p.color, count * Self::MOBILITY_WEIGHT)
            })
            .sum()
    }

    pub fn king_safety(board: &Board) -> Score {
        Self::king_safety_for(board, Black) - Self::king_safety_for(board, White)
    }

    /// Friendly pieces around the king, minus entirely empty files next to it
    fn king_safety_for(board: &Board, color: Color) -> Score {
        let Some(king) = board.king_square(color) else {
            return 0;
        };

        let mut safety = 0;
        for (d_row, d_col) in KING_NEIGHBOURHOOD {
            if let Some(sq) = square::offset(king, d_row, d_col) {
                if board.piece_on(sq).map(|p| p.color) == Some(color) {
                    safety += 10;
                }
            }
        }

        let king_file = file_of(king);
        for col in king_file.saturating_sub(1)..=(king_file + 1).min(7) {
            if (0..8).all(|row| board.piece_at(row, col).is_none()) {
                safety -= 20;
            }
        }
        safety
    }
}

fn signed(color: Color, value: Score) -> Score {
    if color == White {
        value
    } else {
        -value
    }
}
