use chess_core::{Color, Move, PieceKind, Position};

use crate::eval::evaluate;
use crate::ordering::order_moves;

/// Score of a mate; the remaining depth is added so quicker mates rank higher.
pub const MATE_SCORE: i32 = 99_999;
const INF: i32 = i32::MAX / 2;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SearchOptions {
    pub underpromotions: bool,
}

/// Legal moves the search considers, best first.
pub(crate) fn candidate_moves(pos: &Position, opts: SearchOptions) -> Vec<Move> {
    let mut moves = pos.legal_moves();
    if !opts.underpromotions {
        moves.retain(|m| m.promotion.map_or(true, |p| p == PieceKind::Queen));
    }
    order_moves(&pos.board, &mut moves);
    moves
}

/// Root search. White maximizes and Black minimizes; among equal scores the
/// earliest move in search order wins.
pub(crate) fn pick_best_move(
    pos: &Position,
    depth: u8,
    opts: SearchOptions,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let depth = depth.max(1);
    let maximizing = pos.side_to_move == Color::White;

    let mut best: Option<(Move, i32)> = None;
    for mv in candidate_moves(pos, opts) {
        let child = pos.with_move(&mv);
        let score = alphabeta(&child, depth - 1, -INF, INF, opts, nodes);
        let improves = match best {
            None => true,
            Some((_, b)) if maximizing => score > b,
            Some((_, b)) => score < b,
        };
        if improves {
            best = Some((mv, score));
        }
    }
    best
}

pub(crate) fn alphabeta(
    pos: &Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    opts: SearchOptions,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate(&pos.board);
    }

    let maximizing = pos.side_to_move == Color::White;
    let moves = candidate_moves(pos, opts);
    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            let mate = MATE_SCORE + depth as i32;
            return if maximizing { -mate } else { mate };
        }
        return 0;
    }

    if maximizing {
        let mut best = -INF;
        for mv in &moves {
            let score = alphabeta(&pos.with_move(mv), depth - 1, alpha, beta, opts, nodes);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = INF;
        for mv in &moves {
            let score = alphabeta(&pos.with_move(mv), depth - 1, alpha, beta, opts, nodes);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
