//! Error types for the rules engine, the game facade and the console.
//!
//! None of these are fatal: each one describes a rejected request and the
//! state it was made against is left untouched.

use thiserror::Error;

use crate::r#move::Move;

/// Reasons a FEN string could not be loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN string is empty")]
    Empty,

    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),

    #[error("side to move must be 'w' or 'b', found '{0}'")]
    SideToMove(String),

    #[error("invalid {field} counter '{value}'")]
    Counter { field: &'static str, value: String },

    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: &'static str, count: usize },

    #[error("{color} has {count} pieces, at most 16 are allowed")]
    TooManyPieces { color: &'static str, count: usize },
}

/// Rejected requests made through the `Game` facade
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("the game is over")]
    GameOver,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("a search is already running")]
    AlreadyRunning,
}

/// Console input that could not be carried out
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown or badly formed command: {0}")]
    BadCommand(String),

    #[error("missing an argument: {0}")]
    MissingArg(&'static str),

    #[error("badly formatted move: {0}")]
    BadMove(String),

    #[error("badly formatted square: {0}")]
    BadSquare(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("the engine is thinking, use 'wait' first")]
    Busy,

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
