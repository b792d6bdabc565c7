use crate::attacks::in_check;
use crate::board::{Board, BoardReader, MoveEdits};
use crate::error::ChessError;
use crate::movegen::{legal_moves_into, MoveContext};
use crate::types::*;

/// Everything move generation needs, cheap to clone for search simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Coord>, // square behind a pawn that just advanced 2
    pub rules: VariantRules,
}

/// What a move did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl Position {
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            rules: VariantRules::default(),
        }
    }

    /// Forsyth-Edwards Notation parser used by tests and debugging. Piece ids
    /// are assigned 1.. in row-major order; move counters are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let bad = |msg: String| ChessError::InvalidFen(msg);
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(bad(format!("expected at least 2 fields, found {}", parts.len())));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad(format!("expected 8 ranks, found {}", ranks.len())));
        }

        let mut board = Board::empty();
        let mut next_id = 1;
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col = col.saturating_add(d as u8);
                } else {
                    let kind = PieceKind::from_symbol(ch)
                        .ok_or_else(|| bad(format!("invalid piece char '{ch}'")))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if col >= 8 {
                        return Err(bad(format!("too many files in rank {}", 8 - row)));
                    }
                    board.set(Coord::new(row as u8, col), Some(Piece::new(color, kind, next_id)));
                    next_id += 1;
                    col += 1;
                }
            }
            if col != 8 {
                return Err(bad(format!("rank {} has {} files", 8 - row, col)));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(bad(format!("invalid side to move '{other}'"))),
        };

        let mut castling = CastlingRights::none();
        let castle_part = parts.get(2).copied().unwrap_or("-");
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.white.kingside = true,
                    'Q' => castling.white.queenside = true,
                    'k' => castling.black.kingside = true,
                    'q' => castling.black.queenside = true,
                    _ => return Err(bad(format!("invalid castling char '{c}'"))),
                }
            }
        }

        let en_passant = match parts.get(3).copied().unwrap_or("-") {
            "-" => None,
            s => Some(
                Coord::from_label(s)
                    .ok_or_else(|| bad(format!("invalid en passant square '{s}'")))?,
            ),
        };

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            rules: VariantRules::default(),
        })
    }

    pub fn with_rules(mut self, rules: VariantRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn context(&self) -> MoveContext {
        MoveContext {
            side: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            rules: self.rules,
        }
    }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.board.piece_at(at)
    }

    pub fn king_sq(&self, c: Color) -> Option<Coord> {
        self.board.find_king(c)
    }

    pub fn in_check(&self, c: Color) -> bool {
        in_check(&self.board, c, &self.rules)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.legal_moves_into(&mut out);
        out
    }

    pub fn legal_moves_into(&self, out: &mut Vec<Move>) {
        legal_moves_into(&self.board, &self.context(), out);
    }

    /// Plays `mv` in place and passes the turn. Returns `None`, leaving the
    /// position untouched, when `from` is empty.
    pub fn make_move(&mut self, mv: &Move) -> Option<AppliedMove> {
        let applied = apply_move(&mut self.board, &mut self.castling, &mut self.en_passant, mv)?;
        self.side_to_move = self.side_to_move.other();
        Some(applied)
    }

    /// Copy-on-write successor.
    pub fn with_move(&self, mv: &Move) -> Position {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

/// Carries out `mv` on the board and updates the en-passant square and
/// castling rights. Turn order is left to the caller.
pub fn apply_move(
    board: &mut Board,
    castling: &mut CastlingRights,
    en_passant: &mut Option<Coord>,
    mv: &Move,
) -> Option<AppliedMove> {
    let piece = board.piece_at(mv.from)?;
    let captured = if mv.is_en_passant {
        board.piece_at(Coord::new(mv.from.row, mv.to.col))
    } else {
        board.piece_at(mv.to)
    };

    let edits = MoveEdits::plan(&*board, mv);
    board.apply(&edits);

    *en_passant = None;
    if piece.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2 {
        *en_passant = Some(Coord::new((mv.from.row + mv.to.row) / 2, mv.from.col));
    }

    match piece.kind {
        PieceKind::King => castling.revoke_all(piece.color),
        PieceKind::Rook => revoke_corner(castling, piece.color, mv.from),
        _ => {}
    }
    if let Some(cap) = captured {
        if cap.kind == PieceKind::Rook {
            revoke_corner(castling, cap.color, mv.to);
        }
    }

    Some(AppliedMove { piece, captured })
}

/// Drops the right tied to a rook's home corner when `at` is that corner.
pub(crate) fn revoke_corner(castling: &mut CastlingRights, c: Color, at: Coord) {
    if at.row != c.back_row() {
        return;
    }
    for side in CastleSide::ALL {
        if at.col == side.rook_from_col() {
            castling.revoke(c, side);
        }
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
