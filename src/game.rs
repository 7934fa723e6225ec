use log::{debug, info};

use crate::board::{Board, Outcome};
use crate::error::{FenError, GameError};
use crate::movelist::MoveList;
use crate::piece::{Color, Piece};
use crate::r#move::Move;
use crate::search::{self, SearchOptions};
use crate::square::{self, Square};

/// What a click on the board did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A piece of the side to move is now selected
    Selected(Square),
    /// The selected piece has been moved there
    Moved(Move),
    /// Nothing happened, any previous selection is dropped
    Rejected,
}

/// A game being played: the board plus the square picked by the first of two clicks.
///
/// ```
/// use pawnstorm::game::{Game, Selection};
///
/// let mut game = Game::new();
/// assert_eq!(game.select(1, 4), Selection::Selected(12));
/// assert!(matches!(game.select(3, 4), Selection::Moved(_)));
/// assert!(game.undo());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    selected: Option<Square>,
}
impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            selected: None,
        }
    }

    /// Starts over from the standard starting position
    pub fn new_game(&mut self) {
        self.board.reset();
        self.selected = None;
        info!("new game");
    }

    /// Replaces the current position, keeping the previous one on error
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.board = Board::from_fen(fen)?;
        self.selected = None;
        info!("loaded {}", self.board.fen());
        Ok(())
    }

    /// Two step move entry.
    /// The first click has to land on a piece of the side to move, the second one
    /// tries to move it there and clears the selection whatever happens.
    pub fn select(&mut self, row: usize, col: usize) -> Selection {
        let sq = square::from_coords(row, col);
        match self.selected.take() {
            None => match self.board.piece_on(sq) {
                Some(p) if p.color == self.board.side_to_move() => {
                    self.selected = Some(sq);
                    Selection::Selected(sq)
                }
                _ => Selection::Rejected,
            },
            Some(origin) => {
                let mv = Move::new(origin, sq);
                match self.apply_move(mv) {
                    Ok(()) => Selection::Moved(mv),
                    Err(_) => Selection::Rejected,
                }
            }
        }
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Plays a move for the side to move
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        self.selected = None;
        if self.board.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.is_valid_move(mv) {
            debug!("rejected {} in {}", mv, self.board.fen());
            return Err(GameError::IllegalMove(mv));
        }
        self.board.make(mv);
        info!("{} played {}", self.board.side_to_move().opposite().name(), mv);
        if self.board.is_game_over() {
            info!("game over: {}", self.board.outcome());
        }
        Ok(())
    }

    /// Takes back the last move, false if there was none
    pub fn undo(&mut self) -> bool {
        self.selected = None;
        match self.board.unmake() {
            Some(mv) => {
                info!("took back {}", mv);
                true
            }
            None => false,
        }
    }

    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Searches the current position, see `search::best_move`
    pub fn best_move(&self, options: &SearchOptions) -> Option<Move> {
        search::best_move(&self.board, options)
    }

    /// Lets the engine play for the side to move
    pub fn play_engine_move(&mut self, options: &SearchOptions) -> Option<Move> {
        let mv = self.best_move(options)?;
        self.apply_move(mv).ok()?;
        Some(mv)
    }

    pub fn piece(&self, row: usize, col: usize) -> Option<Piece> {
        self.board.piece_at(row, col)
    }

    pub fn current_player(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}
