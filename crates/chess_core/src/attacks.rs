//! Square attack detection.

use crate::board::BoardReader;
use crate::types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// True if any piece of `by` attacks `target`.
pub fn is_square_attacked<B: BoardReader + ?Sized>(
    board: &B,
    target: Coord,
    by: Color,
    rules: &VariantRules,
) -> bool {
    let owned_by = |at: Coord| board.piece_at(at).filter(|pc| pc.color == by);

    // A pawn of `by` attacks the square one step ahead of it, diagonally.
    let back = -by.forward();
    for dc in [-1, 1] {
        if let Some(pc) = target.offset(back, dc).and_then(owned_by) {
            if pc.kind == PieceKind::Pawn {
                return true;
            }
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(pc) = target.offset(dr, dc).and_then(owned_by) {
            if pc.kind == PieceKind::Knight {
                return true;
            }
        }
    }

    for (dr, dc) in KING_OFFSETS {
        if let Some(pc) = target.offset(dr, dc).and_then(owned_by) {
            if pc.kind == PieceKind::King || captures_adjacent(&pc, rules) {
                return true;
            }
        }
    }

    ray_hits(board, target, by, &DIAGONALS, [PieceKind::Bishop, PieceKind::Queen])
        || ray_hits(board, target, by, &ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen])
}

fn ray_hits<B: BoardReader + ?Sized>(
    board: &B,
    target: Coord,
    by: Color,
    dirs: &[(i8, i8)],
    sliders: [PieceKind; 2],
) -> bool {
    for &(dr, dc) in dirs {
        let mut cur = target.offset(dr, dc);
        while let Some(at) = cur {
            if let Some(pc) = board.piece_at(at) {
                if pc.color == by && sliders.contains(&pc.kind) {
                    return true;
                }
                break;
            }
            cur = at.offset(dr, dc);
        }
    }
    false
}

/// Whether `c`'s king is attacked. A missing king counts as not in check.
pub fn in_check<B: BoardReader + ?Sized>(board: &B, c: Color, rules: &VariantRules) -> bool {
    match board.find_king(c) {
        Some(k) => is_square_attacked(board, k, c.other(), rules),
        None => false,
    }
}

fn captures_adjacent(pc: &Piece, rules: &VariantRules) -> bool {
    matches!(
        pc.movement(rules),
        MovementProfile::Altered(AlteredMovement::KingStep {
            capture: CursedPawnCapture::AnyAdjacent
        })
    )
}
