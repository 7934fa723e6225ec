use crate::piece::Piece;
use crate::r#move::Move;

/// Everything `Board::unmake` needs to restore the position before `move_played`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub move_played: Move,
    pub captured_piece: Option<Piece>,
    pub half_move_clock: u32,
    pub move_count: u32,
}
