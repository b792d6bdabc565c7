//! Move ordering for better alpha-beta cutoffs.

use std::cmp::Reverse;

use chess_core::{Board, Move, PieceKind};

use crate::eval::piece_value;

const PROMOTION_BONUS: i32 = 800;
const CASTLE_BONUS: i32 = 50;
/// Attacker value used when the origin square is unexpectedly empty.
const UNKNOWN_ATTACKER: i32 = 999;

/// Heuristic priority of `mv` on `board`. Captures use a simplified
/// MVV-LVA: victim value times ten minus attacker value.
pub fn move_score(board: &Board, mv: &Move) -> i32 {
    let mut score = 0;
    if mv.is_capture {
        let victim = if mv.is_en_passant {
            piece_value(PieceKind::Pawn)
        } else {
            board.get(mv.to).map_or(0, |pc| piece_value(pc.kind))
        };
        let attacker = board.get(mv.from).map_or(UNKNOWN_ATTACKER, |pc| piece_value(pc.kind));
        score += victim * 10 - attacker;
    }
    if mv.promotion.is_some() {
        score += PROMOTION_BONUS;
    }
    if mv.castle.is_some() {
        score += CASTLE_BONUS;
    }
    score
}

/// Sorts best first. The sort is stable, so equal scores keep generation order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(move_score(board, mv)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
