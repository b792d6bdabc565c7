//! Legal move generation.
//!
//! One pure generator serves both the rule engine and the search: it reads
//! piece placement through [`BoardReader`] and everything else from a
//! [`MoveContext`], and filters pseudo-legal moves by previewing each one on a
//! [`BoardOverlay`] and testing the mover's king.

use crate::attacks::{
    in_check, is_square_attacked, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS,
};
use crate::board::{BoardOverlay, BoardReader};
use crate::types::*;

/// Non-placement state that move generation depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveContext {
    pub side: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Coord>,
    pub rules: VariantRules,
}

/// Generate all legal moves for `ctx.side`, returning a freshly allocated vector.
pub fn legal_moves<B: BoardReader + ?Sized>(board: &B, ctx: &MoveContext) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, ctx, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    out: &mut Vec<Move>,
) {
    out.clear();
    for from in Coord::all() {
        pseudo_moves_from(board, ctx, from, out);
    }
    out.retain(|mv| keeps_king_safe(board, ctx, mv));
}

/// Legal moves of the piece on `from`. Empty when the square is empty or the
/// piece does not belong to `ctx.side`.
pub fn legal_moves_from<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    from: Coord,
    out: &mut Vec<Move>,
) {
    out.clear();
    pseudo_moves_from(board, ctx, from, out);
    out.retain(|mv| keeps_king_safe(board, ctx, mv));
}

/// Stops at the first legal move found.
pub fn has_legal_move<B: BoardReader + ?Sized>(board: &B, ctx: &MoveContext) -> bool {
    let mut buf = Vec::with_capacity(32);
    Coord::all().any(|from| {
        buf.clear();
        pseudo_moves_from(board, ctx, from, &mut buf);
        buf.iter().any(|mv| keeps_king_safe(board, ctx, mv))
    })
}

fn keeps_king_safe<B: BoardReader + ?Sized>(board: &B, ctx: &MoveContext, mv: &Move) -> bool {
    !in_check(&BoardOverlay::new(board, mv), ctx.side, &ctx.rules)
}

/// Appends the pseudo-legal moves of the piece on `from`.
pub fn pseudo_moves_from<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    from: Coord,
    out: &mut Vec<Move>,
) {
    let pc = match board.piece_at(from) {
        Some(p) if p.color == ctx.side => p,
        _ => return,
    };
    match (pc.kind, pc.movement(&ctx.rules)) {
        (_, MovementProfile::Altered(AlteredMovement::KingStep { capture })) => {
            gen_king_step_pawn(board, ctx, from, pc.color, capture, out)
        }
        (PieceKind::Pawn, MovementProfile::Standard) => gen_pawn(board, ctx, from, pc.color, out),
        (PieceKind::Knight, _) => gen_steps(board, from, pc.color, &KNIGHT_OFFSETS, out),
        (PieceKind::Bishop, _) => gen_slider(board, from, pc.color, &DIAGONALS, out),
        (PieceKind::Rook, _) => gen_slider(board, from, pc.color, &ORTHOGONALS, out),
        (PieceKind::Queen, _) => {
            gen_slider(board, from, pc.color, &ORTHOGONALS, out);
            gen_slider(board, from, pc.color, &DIAGONALS, out);
        }
        (PieceKind::King, _) => {
            gen_steps(board, from, pc.color, &KING_OFFSETS, out);
            gen_castle(board, ctx, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: Coord, to: Coord, is_capture: bool, c: Color, out: &mut Vec<Move>) {
    let base = Move {
        is_capture,
        ..Move::new(from, to)
    };
    if to.row == c.promotion_row() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move {
                promotion: Some(pk),
                ..base
            });
        }
    } else {
        out.push(base);
    }
}

fn gen_pawn<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    from: Coord,
    c: Color,
    out: &mut Vec<Move>,
) {
    let dir = c.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            push_pawn_move(from, one, false, c, out);

            if from.row == c.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece_at(two).is_none() {
                        out.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.piece_at(to).is_some_and(|t| t.color != c) {
                push_pawn_move(from, to, true, c, out);
            }
        }
    }
    out.extend(en_passant_capture(board, ctx, from, c));
}

fn en_passant_capture<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    from: Coord,
    c: Color,
) -> Option<Move> {
    let target = ctx.en_passant?;
    if target.row as i8 != from.row as i8 + c.forward() || target.col.abs_diff(from.col) != 1 {
        return None;
    }
    let victim = board.piece_at(Coord::new(from.row, target.col));
    let victim_ok = victim.is_some_and(|v| v.color != c && v.kind == PieceKind::Pawn);
    (victim_ok && board.piece_at(target).is_none()).then(|| Move {
        is_en_passant: true,
        ..Move::capture(from, target)
    })
}

/// A cursed pawn: one step in any direction onto empty squares, captures per
/// the configured rule, en passant kept. A step onto the en passant target is
/// always the capture.
fn gen_king_step_pawn<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    from: Coord,
    c: Color,
    capture: CursedPawnCapture,
    out: &mut Vec<Move>,
) {
    let en_passant = en_passant_capture(board, ctx, from, c);
    for (dr, dc) in KING_OFFSETS {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        let diagonal_forward = dr == c.forward() && dc != 0;
        match board.piece_at(to) {
            None if en_passant.is_some_and(|ep| ep.to == to) => {}
            None => push_pawn_move(from, to, false, c, out),
            Some(t) if t.color != c => {
                let allowed = match capture {
                    CursedPawnCapture::PawnDiagonal => diagonal_forward,
                    CursedPawnCapture::AnyAdjacent => true,
                };
                if allowed {
                    push_pawn_move(from, to, true, c, out);
                }
            }
            Some(_) => {}
        }
    }
    out.extend(en_passant);
}

fn gen_steps<B: BoardReader + ?Sized>(
    board: &B,
    from: Coord,
    c: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::capture(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider<B: BoardReader + ?Sized>(
    board: &B,
    from: Coord,
    c: Color,
    dirs: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::capture(from, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, dc);
        }
    }
}

fn gen_castle<B: BoardReader + ?Sized>(
    board: &B,
    ctx: &MoveContext,
    from: Coord,
    c: Color,
    out: &mut Vec<Move>,
) {
    let row = c.back_row();
    if from != Coord::new(row, 4) {
        return;
    }
    let enemy = c.other();

    for side in CastleSide::ALL {
        if !ctx.castling.allows(c, side) {
            continue;
        }
        // Rights can outlive the rook when pieces are removed outside normal play.
        let rook_home = board
            .piece_at(Coord::new(row, side.rook_from_col()))
            .is_some_and(|r| r.color == c && r.kind == PieceKind::Rook);
        if !rook_home {
            continue;
        }
        let blocked = side
            .between_cols()
            .iter()
            .any(|&col| board.piece_at(Coord::new(row, col)).is_some());
        if blocked {
            continue;
        }
        // Start, transit and destination squares must all be safe.
        let attacked = side
            .king_path_cols()
            .iter()
            .any(|&col| is_square_attacked(board, Coord::new(row, col), enemy, &ctx.rules));
        if attacked {
            continue;
        }
        out.push(Move {
            castle: Some(side),
            ..Move::new(from, Coord::new(row, side.king_to_col()))
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
