//! Authoritative game state and the rule engine that mutates it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::attacks::in_check;
use crate::board::{Board, BoardReader};
use crate::error::ChessError;
use crate::movegen::{has_legal_move, legal_moves_from, legal_moves_into, MoveContext};
use crate::position::{apply_move, revoke_corner, Position};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Checkmate,
    Stalemate,
}

/// One played move, as shown in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Color,
    pub piece: PieceKind,
    pub from: String,
    pub to: String,
    pub captured: Option<PieceKind>,
    pub promoted_to: Option<PieceKind>,
}

/// Result of an accepted move. Check and mate flags describe the side that
/// is now to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub piece_id: u32,
    pub captured: Option<PieceKind>,
    pub captured_id: Option<u32>,
    pub promoted_to: Option<PieceKind>,
    /// Check that is not mate.
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Complete persisted state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub history: Vec<MoveRecord>,
    pub en_passant: Option<Coord>,
    pub castling: CastlingRights,
    pub status: GameStatus,
    pub winner: Option<Color>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            turn: Color::White,
            history: Vec::new(),
            en_passant: None,
            castling: CastlingRights::all(),
            status: GameStatus::Active,
            winner: None,
        }
    }

    /// Shape checks that serde cannot express.
    fn validate(&self) -> Result<(), ChessError> {
        let bad = |msg: String| Err(ChessError::MalformedState(msg));

        if let Some(ep) = self.en_passant {
            if !ep.is_valid() {
                return bad(format!("en passant square {ep:?} is off the board"));
            }
        }

        let mut ids: Vec<u32> = self.board.pieces().map(|(_, pc)| pc.id).collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return bad(format!("duplicate piece id {}", w[0]));
        }

        match (self.status, self.winner) {
            (GameStatus::Checkmate, None) => bad("checkmate without a winner".to_string()),
            (GameStatus::Active | GameStatus::Stalemate, Some(w)) => {
                bad(format!("{:?} game cannot have winner {w}", self.status))
            }
            _ => Ok(()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Single source of truth for legality and state transitions of one game.
///
/// Access is not synchronized; callers serialize calls to `make_move`.
#[derive(Clone, Debug, Default)]
pub struct RuleEngine {
    state: GameState,
    rules: VariantRules,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: VariantRules) -> Self {
        Self {
            state: GameState::new(),
            rules,
        }
    }

    /// Starts from an arbitrary position with an empty history. The status is
    /// computed for the side to move.
    pub fn from_position(pos: Position) -> Self {
        let mut engine = Self {
            state: GameState {
                board: pos.board,
                turn: pos.side_to_move,
                history: Vec::new(),
                en_passant: pos.en_passant,
                castling: pos.castling,
                status: GameStatus::Active,
                winner: None,
            },
            rules: pos.rules,
        };
        engine.refresh_status();
        engine
    }

    pub fn reset(&mut self) {
        self.state = GameState::new();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn board(&self) -> &Board {
        &self.state.board
    }
    pub fn turn(&self) -> Color {
        self.state.turn
    }
    pub fn status(&self) -> GameStatus {
        self.state.status
    }
    pub fn winner(&self) -> Option<Color> {
        self.state.winner
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.state.history
    }
    pub fn castling(&self) -> CastlingRights {
        self.state.castling
    }
    pub fn en_passant(&self) -> Option<Coord> {
        self.state.en_passant
    }
    pub fn rules(&self) -> &VariantRules {
        &self.rules
    }

    /// Snapshot for search.
    pub fn position(&self) -> Position {
        Position {
            board: self.state.board.clone(),
            side_to_move: self.state.turn,
            castling: self.state.castling,
            en_passant: self.state.en_passant,
            rules: self.rules,
        }
    }

    fn context(&self) -> MoveContext {
        MoveContext {
            side: self.state.turn,
            castling: self.state.castling,
            en_passant: self.state.en_passant,
            rules: self.rules,
        }
    }

    pub fn in_check(&self, c: Color) -> bool {
        in_check(&self.state.board, c, &self.rules)
    }

    /// Legal destinations of the piece on `at`, in generation order.
    pub fn legal_moves(&self, at: Coord) -> Vec<Coord> {
        let mut moves = Vec::with_capacity(32);
        legal_moves_from(&self.state.board, &self.context(), at, &mut moves);
        let mut targets: Vec<Coord> = Vec::with_capacity(moves.len());
        for mv in moves {
            if !targets.contains(&mv.to) {
                targets.push(mv.to);
            }
        }
        targets
    }

    /// Every legal move of the side to move.
    pub fn legal_moves_for_side(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(&self.state.board, &self.context(), &mut out);
        out
    }

    /// Plays `from`→`to` for the side to move. `promotion` defaults to a
    /// queen and is ignored unless a pawn reaches the far rank.
    ///
    /// On error nothing changes.
    pub fn make_move(
        &mut self,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, ChessError> {
        if self.state.status != GameStatus::Active {
            return Err(ChessError::GameOver);
        }
        let promotion = promotion.unwrap_or(PieceKind::Queen);
        if matches!(promotion, PieceKind::Pawn | PieceKind::King) {
            return Err(ChessError::InvalidPromotion(promotion));
        }

        let mut candidates = Vec::with_capacity(32);
        legal_moves_from(&self.state.board, &self.context(), from, &mut candidates);
        let mv = candidates
            .into_iter()
            .find(|m| m.to == to && m.promotion.map_or(true, |p| p == promotion))
            .ok_or(ChessError::IllegalMove { from, to })?;

        let state = &mut self.state;
        let applied = apply_move(&mut state.board, &mut state.castling, &mut state.en_passant, &mv)
            .ok_or(ChessError::IllegalMove { from, to })?;

        let mover = applied.piece.color;
        state.history.push(MoveRecord {
            side: mover,
            piece: applied.piece.kind,
            from: from.label(),
            to: to.label(),
            captured: applied.captured.map(|pc| pc.kind),
            promoted_to: mv.promotion,
        });
        state.turn = mover.other();
        debug!(mv = %mv, side = %mover, "move applied");

        let in_check = self.refresh_status();
        let outcome = MoveOutcome {
            piece_id: applied.piece.id,
            captured: applied.captured.map(|pc| pc.kind),
            captured_id: applied.captured.map(|pc| pc.id),
            promoted_to: mv.promotion,
            is_check: in_check && self.state.status == GameStatus::Active,
            is_checkmate: self.state.status == GameStatus::Checkmate,
            is_stalemate: self.state.status == GameStatus::Stalemate,
        };
        Ok(outcome)
    }

    /// Recomputes status for the side to move; returns whether it is in check.
    fn refresh_status(&mut self) -> bool {
        let side = self.state.turn;
        let checked = self.in_check(side);
        if has_legal_move(&self.state.board, &self.context()) {
            self.state.status = GameStatus::Active;
            self.state.winner = None;
        } else if checked {
            self.state.status = GameStatus::Checkmate;
            self.state.winner = Some(side.other());
            info!(winner = %side.other(), "checkmate");
        } else {
            self.state.status = GameStatus::Stalemate;
            self.state.winner = None;
            info!("stalemate");
        }
        checked
    }

    /// Variant hook: lets an external collaborator update a piece's counters
    /// and capability flags.
    pub fn piece_by_id_mut(&mut self, id: u32) -> Option<&mut Piece> {
        let at = self.state.board.find_by_id(id)?;
        self.state.board.get_mut(at)
    }

    /// Exchanges two squares' contents as a whole turn of the side to move,
    /// outside the normal move rules. The piece on `a` must belong to the side
    /// to move and `b` must be empty or hold another of its pieces. Kings
    /// cannot take part, and no pawn may land on its promotion row.
    pub fn swap_pieces(&mut self, a: Coord, b: Coord) -> Result<(), ChessError> {
        if self.state.status != GameStatus::Active {
            return Err(ChessError::GameOver);
        }
        let side = self.state.turn;
        let board = &self.state.board;
        let first = board.piece_at(a).filter(|pc| pc.color == side);
        let second_ok = board.piece_at(b).map_or(true, |pc| pc.color == side);
        let involves_king = [a, b]
            .iter()
            .any(|&at| board.piece_at(at).is_some_and(|pc| pc.kind == PieceKind::King));
        if a == b || first.is_none() || !second_ok || involves_king {
            return Err(ChessError::InvalidSwap(a, b));
        }

        let mut preview = self.state.board.clone();
        let pa = preview.take(a);
        let pb = preview.take(b);
        preview.set(a, pb);
        preview.set(b, pa);
        // A pawn parked on its last row could never move or promote.
        let stranded_pawn = [(a, pb), (b, pa)].iter().any(|(at, pc)| {
            pc.is_some_and(|pc| pc.kind == PieceKind::Pawn && at.row == pc.color.promotion_row())
        });
        if stranded_pawn || in_check(&preview, side, &self.rules) {
            return Err(ChessError::InvalidSwap(a, b));
        }

        for (at, pc) in [(a, pa), (b, pb)] {
            if let Some(pc) = pc {
                if pc.kind == PieceKind::Rook {
                    revoke_corner(&mut self.state.castling, pc.color, at);
                }
            }
        }
        self.state.board = preview;
        self.state.en_passant = None;
        self.state.turn = side.other();
        debug!(%a, %b, side = %side, "pieces swapped");
        self.refresh_status();
        Ok(())
    }

    /// JSON encoding of the full game state.
    pub fn serialize(&self) -> Result<String, ChessError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Replaces the game state with a decoded one. Leaves the current state
    /// untouched on any error.
    pub fn deserialize(&mut self, text: &str) -> Result<(), ChessError> {
        let parsed: GameState = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "rejected serialized game state");
            ChessError::from(e)
        })?;
        if let Err(e) = parsed.validate() {
            warn!(error = %e, "rejected serialized game state");
            return Err(e);
        }
        self.state = parsed;
        Ok(())
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
