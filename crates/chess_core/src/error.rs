//! Error types for rule-engine operations.

use thiserror::Error;

use crate::types::{Coord, PieceKind};

#[derive(Debug, Error)]
pub enum ChessError {
    /// The destination is not among the piece's legal moves.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Coord, to: Coord },

    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),

    #[error("the game is already over")]
    GameOver,

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("game state (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Parsed JSON that does not describe a consistent game.
    #[error("malformed game state: {0}")]
    MalformedState(String),

    #[error("piece has no curse ready to activate")]
    CurseNotReady,

    #[error("no piece with id {0}")]
    UnknownPiece(u32),

    #[error("cannot swap {0} and {1}")]
    InvalidSwap(Coord, Coord),
}
