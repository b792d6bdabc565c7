use super::*;
use chess_core::Coord;

const QUEEN_ONLY: SearchOptions = SearchOptions {
    underpromotions: false,
};

fn sq(label: &str) -> Coord {
    Coord::from_label(label).unwrap()
}

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

/// Plain minimax over the same move list, no pruning.
fn minimax(pos: &Position, depth: u8, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate(&pos.board);
    }
    let maximizing = pos.side_to_move == Color::White;
    let moves = candidate_moves(pos, QUEEN_ONLY);
    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            let mate = MATE_SCORE + depth as i32;
            return if maximizing { -mate } else { mate };
        }
        return 0;
    }
    let scores = moves
        .iter()
        .map(|mv| minimax(&pos.with_move(mv), depth - 1, nodes));
    if maximizing {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
    "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR b KQkq -",
];

#[test]
fn alphabeta_matches_minimax_at_depth_two() {
    for fen in POSITIONS {
        let p = pos(fen);
        let (mut a, mut b) = (0, 0);
        assert_eq!(
            alphabeta(&p, 2, -INF, INF, QUEEN_ONLY, &mut a),
            minimax(&p, 2, &mut b),
            "{fen}"
        );
    }
}

#[test]
fn alphabeta_matches_minimax_at_depth_three_with_fewer_nodes() {
    for fen in &POSITIONS[2..] {
        let p = pos(fen);
        let (mut ab_nodes, mut mm_nodes) = (0, 0);
        assert_eq!(
            alphabeta(&p, 3, -INF, INF, QUEEN_ONLY, &mut ab_nodes),
            minimax(&p, 3, &mut mm_nodes),
            "{fen}"
        );
        assert!(ab_nodes < mm_nodes, "{fen}: {ab_nodes} >= {mm_nodes}");
    }
}

#[test]
fn root_score_matches_best_minimax_child() {
    let p = pos(POSITIONS[3]);
    let mut nodes = 0;
    let (mv, score) = pick_best_move(&p, 2, QUEEN_ONLY, &mut nodes).unwrap();

    let child_scores: Vec<i32> = candidate_moves(&p, QUEEN_ONLY)
        .iter()
        .map(|m| minimax(&p.with_move(m), 1, &mut 0))
        .collect();
    // Black to move minimizes.
    let best = *child_scores.iter().min().unwrap();
    assert_eq!(score, best);
    let first_best = child_scores.iter().position(|&s| s == best).unwrap();
    assert_eq!(mv, candidate_moves(&p, QUEEN_ONLY)[first_best]);
}

#[test]
fn finds_mate_in_one_for_white() {
    let p = pos("6k1/5ppp/8/8/8/8/8/R5K1 w - -");
    let (mv, score) = pick_best_move(&p, 2, QUEEN_ONLY, &mut 0).unwrap();
    assert_eq!((mv.from, mv.to), (sq("a1"), sq("a8")));
    assert_eq!(score, MATE_SCORE + 1);
}

#[test]
fn finds_mate_in_one_for_black() {
    let p = pos("r5k1/8/8/8/8/8/5PPP/6K1 b - -");
    let (mv, score) = pick_best_move(&p, 3, QUEEN_ONLY, &mut 0).unwrap();
    assert_eq!((mv.from, mv.to), (sq("a8"), sq("a1")));
    assert_eq!(score, -(MATE_SCORE + 2));
}

#[test]
fn no_move_when_mated_or_stalemated() {
    for fen in ["R5k1/5ppp/8/8/8/8/8/6K1 b - -", "k7/8/1Q6/8/8/8/8/1K6 b - -"] {
        let mut nodes = 0;
        assert_eq!(pick_best_move(&pos(fen), 3, QUEEN_ONLY, &mut nodes), None);
        assert_eq!(nodes, 0);
    }
}

#[test]
fn mated_leaf_scores_against_side_to_move() {
    let mut nodes = 0;
    assert_eq!(
        alphabeta(&pos("R5k1/5ppp/8/8/8/8/8/6K1 b - -"), 2, -INF, INF, QUEEN_ONLY, &mut nodes),
        MATE_SCORE + 2
    );
    assert_eq!(
        alphabeta(&pos("k7/8/1Q6/8/8/8/8/1K6 b - -"), 2, -INF, INF, QUEEN_ONLY, &mut nodes),
        0
    );
}

#[test]
fn depth_zero_root_is_clamped() {
    let p = pos("4k3/8/8/3q4/8/8/8/3RK3 w - -");
    let (mv, _) = pick_best_move(&p, 0, QUEEN_ONLY, &mut 0).unwrap();
    assert_eq!((mv.from, mv.to), (sq("d1"), sq("d5")));
}

#[test]
fn underpromotions_are_filtered_unless_enabled() {
    let p = pos("4k3/1P6/8/8/8/8/8/4K3 w - -");
    let promos = |opts| {
        candidate_moves(&p, opts)
            .into_iter()
            .filter(|m| m.promotion.is_some())
            .count()
    };
    assert_eq!(promos(QUEEN_ONLY), 1);
    assert_eq!(
        promos(SearchOptions {
            underpromotions: true
        }),
        4
    );
}
