use super::*;
use chess_core::Position;

fn eval_fen(fen: &str) -> i32 {
    evaluate(&Position::from_fen(fen).unwrap().board)
}

#[test]
fn startpos_is_balanced() {
    assert_eq!(evaluate(&Position::startpos().board), 0);
}

#[test]
fn mirrored_positions_cancel() {
    // Same structure with colors swapped and the board flipped.
    let white = eval_fen("4k3/8/8/8/3N4/8/4P3/4K3 w - -");
    let black = eval_fen("4k3/4p3/8/3n4/8/8/8/4K3 w - -");
    assert_eq!(white, -black);
    assert!(white > 0);
}

#[test]
fn material_counts_from_white_view() {
    let up_a_queen = eval_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
    assert!(up_a_queen >= piece_value(PieceKind::Queen) - 20);
    let down_a_queen = eval_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR b KQkq -");
    assert_eq!(down_a_queen, -up_a_queen);
}

#[test]
fn central_knight_beats_rim_knight() {
    let center = eval_fen("4k3/8/8/8/3N4/8/8/4K3 w - -");
    let rim = eval_fen("4k3/8/8/8/N7/8/8/4K3 w - -");
    assert_eq!(center - rim, 20 - (-30));
}

#[test]
fn pawn_table_rewards_advancing() {
    // e2 sits on -20, e6 on the 30 row.
    let home = eval_fen("4k3/8/8/8/8/8/4P3/4K3 w - -");
    let advanced = eval_fen("4k3/8/4P3/8/8/8/8/4K3 w - -");
    assert_eq!(advanced - home, 30 - (-20));
}
