//! Property-based tests over random games played through the rule engine.

use chess_core::{Coord, GameStatus, PieceKind, RuleEngine};
use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=60usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Plays up to `plies` random legal moves, calling `check` after each.
fn random_game(
    seed: u64,
    plies: usize,
    mut check: impl FnMut(&RuleEngine) -> Result<(), TestCaseError>,
) -> Result<RuleEngine, TestCaseError> {
    let mut engine = RuleEngine::new();
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..plies {
        let moves = engine.legal_moves_for_side();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let res = engine.make_move(mv.from, mv.to, mv.promotion);
        prop_assert!(res.is_ok(), "generated move {} rejected: {:?}", mv, res);
        check(&engine)?;
    }
    Ok(engine)
}

proptest! {
    /// Property: the side that just moved is never left in check
    #[test]
    fn prop_mover_never_in_check(seed in seed_strategy(), plies in move_count_strategy()) {
        random_game(seed, plies, |engine| {
            let mover = engine.turn().other();
            prop_assert!(!engine.in_check(mover));
            Ok(())
        })?;
    }

    /// Property: per-square queries agree with the whole-side list
    #[test]
    fn prop_square_queries_match_side_moves(
        seed in seed_strategy(),
        plies in move_count_strategy(),
    ) {
        let engine = random_game(seed, plies, |_| Ok(()))?;
        let side_moves = engine.legal_moves_for_side();
        let mut total = 0;
        for at in Coord::all() {
            let targets = engine.legal_moves(at);
            for to in &targets {
                prop_assert!(side_moves.iter().any(|m| m.from == at && m.to == *to));
            }
            total += targets.len();
        }
        // Promotions collapse four choices onto one target.
        let distinct = side_moves
            .iter()
            .filter(|m| m.promotion.map_or(true, |p| p == PieceKind::Queen))
            .count();
        prop_assert_eq!(total, distinct);
    }

    /// Property: status is Active exactly when the side to move has a move
    #[test]
    fn prop_status_matches_move_availability(
        seed in seed_strategy(),
        plies in move_count_strategy(),
    ) {
        random_game(seed, plies, |engine| {
            let has_moves = !engine.legal_moves_for_side().is_empty();
            prop_assert_eq!(engine.status() == GameStatus::Active, has_moves);
            Ok(())
        })?;
    }

    /// Property: serialize then deserialize restores the same state
    #[test]
    fn prop_serialization_roundtrip(seed in seed_strategy(), plies in move_count_strategy()) {
        let engine = random_game(seed, plies, |_| Ok(()))?;
        let json = engine.serialize().unwrap();
        let mut restored = RuleEngine::new();
        restored.deserialize(&json).unwrap();
        prop_assert_eq!(restored.state(), engine.state());
        prop_assert_eq!(restored.legal_moves_for_side(), engine.legal_moves_for_side());
    }
}
