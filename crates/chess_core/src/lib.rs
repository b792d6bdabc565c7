//! Variant chess rules engine.
//!
//! [`RuleEngine`] owns the live [`GameState`] and is the only place moves are
//! accepted. [`Position`] is the cheap snapshot the search copies; both run
//! the same generator in [`movegen`].

pub mod attacks;
pub mod board;
pub mod curse;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod position;
pub mod types;

pub use attacks::{in_check, is_square_attacked};
pub use board::{Board, BoardOverlay, BoardReader, MoveEdits};
pub use curse::{CurseEffect, CurseRules};
pub use error::ChessError;
pub use game::{GameState, GameStatus, MoveOutcome, MoveRecord, RuleEngine};
pub use movegen::{has_legal_move, legal_moves, legal_moves_from, legal_moves_into, MoveContext};
pub use perft::perft;
pub use position::{apply_move, AppliedMove, Position};
pub use types::*;
