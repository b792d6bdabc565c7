//! Capture-count curses: the trigger policy behind the per-piece
//! `capture_count` / `special_ready` / `special_used` flags.
//!
//! The rule engine only reads `special_used` (through
//! [`Piece::movement`](crate::Piece::movement)); this module decides when
//! the flags change. Callers feed it captures reported by
//! [`MoveOutcome`](crate::MoveOutcome) and reach the capturing piece with
//! [`RuleEngine::piece_by_id_mut`](crate::RuleEngine::piece_by_id_mut).

use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::types::{Piece, PieceKind};

/// Captures needed before a piece of each kind becomes cursed. Kinds without
/// a threshold never curse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurseRules {
    pub pawn: Option<u32>,
    pub knight: Option<u32>,
    pub rook: Option<u32>,
}

impl Default for CurseRules {
    fn default() -> Self {
        Self {
            pawn: Some(2),
            knight: Some(3),
            rook: Some(5),
        }
    }
}

/// What activating a curse asks of the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurseEffect {
    /// The pawn now moves like a king; nothing else to do.
    KingStep,
    /// The knight trades places with another friendly non-king piece; the
    /// caller performs it with `RuleEngine::swap_pieces` and then calls
    /// [`CurseRules::consume`].
    SwapPending,
    /// Cursed, but this kind has no ability yet.
    NoAbility,
}

impl CurseRules {
    pub fn threshold(&self, kind: PieceKind) -> Option<u32> {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Rook => self.rook,
            _ => None,
        }
    }

    /// Counts a capture made by `piece`. Returns true when this capture is
    /// the one that readies the curse.
    pub fn register_capture(&self, piece: &mut Piece) -> bool {
        let Some(threshold) = self.threshold(piece.kind) else {
            return false;
        };
        piece.capture_count += 1;
        if !piece.special_ready && !piece.special_used && piece.capture_count >= threshold {
            piece.special_ready = true;
            return true;
        }
        false
    }

    pub fn is_ready(piece: &Piece) -> bool {
        piece.special_ready && !piece.special_used
    }

    pub fn activate(&self, piece: &mut Piece) -> Result<CurseEffect, ChessError> {
        if !Self::is_ready(piece) {
            return Err(ChessError::CurseNotReady);
        }
        match piece.kind {
            PieceKind::Pawn => {
                Self::consume(piece);
                Ok(CurseEffect::KingStep)
            }
            PieceKind::Knight => Ok(CurseEffect::SwapPending),
            _ => Ok(CurseEffect::NoAbility),
        }
    }

    /// Marks the curse as spent.
    pub fn consume(piece: &mut Piece) {
        piece.special_ready = false;
        piece.special_used = true;
    }
}
