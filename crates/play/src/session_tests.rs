use super::*;
use chess_core::Position;

fn quick_config() -> PlayConfig {
    let mut config = PlayConfig::default();
    config.engine.search.seed = Some(17);
    config.engine.tiers.medium.depth = 2;
    config.engine.tiers.hard.depth = 2;
    config
}

fn run(session: &mut Session, line: &str) -> Result<String> {
    let mut out = Vec::new();
    session.handle(line, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn sq(label: &str) -> Coord {
    Coord::from_label(label).unwrap()
}

fn session_at(fen: &str) -> Session {
    let mut session = Session::new(quick_config());
    session.game = RuleEngine::from_position(Position::from_fen(fen).unwrap());
    session
}

#[test]
fn human_move_gets_engine_reply() {
    let mut session = Session::new(quick_config());
    let out = run(&mut session, "move e2e4").unwrap();
    assert!(out.contains("black plays"), "{out}");
    assert_eq!(session.game().history().len(), 2);
    assert_eq!(session.game().turn(), Color::White);
}

#[test]
fn illegal_move_is_reported_and_ignored() {
    let mut session = Session::new(quick_config());
    let err = run(&mut session, "move e2e5").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChessError>(),
        Some(ChessError::IllegalMove { .. })
    ));
    assert!(run(&mut session, "move e2").is_err());
    assert!(run(&mut session, "move z9e4").is_err());
    assert!(session.game().history().is_empty());
}

#[test]
fn new_game_as_black_lets_engine_open() {
    let mut session = Session::new(quick_config());
    let out = run(&mut session, "new black 3").unwrap();
    assert!(out.contains("you play black"));
    assert!(out.contains("white plays"));
    assert_eq!(session.human(), Color::Black);
    assert_eq!(session.difficulty(), Difficulty::Hard);
    assert_eq!(session.game().history().len(), 1);
    assert_eq!(session.game().turn(), Color::Black);

    assert!(run(&mut session, "new purple").is_err());
}

#[test]
fn legal_lists_destinations() {
    let mut session = Session::new(quick_config());
    assert_eq!(run(&mut session, "legal e2").unwrap(), "e2: e3 e4\n");
    assert_eq!(run(&mut session, "legal e7").unwrap(), "e7: \n");
    assert!(run(&mut session, "legal").is_err());
}

#[test]
fn save_and_load_round_trip() {
    let mut session = Session::new(quick_config());
    run(&mut session, "move d2d4").unwrap();
    let json = run(&mut session, "save").unwrap();

    let mut other = Session::new(quick_config());
    run(&mut other, &format!("load {}", json.trim())).unwrap();
    assert_eq!(other.game().state(), session.game().state());

    let before = other.game().state().clone();
    assert!(run(&mut other, "load {not json").is_err());
    assert!(run(&mut other, "load").is_err());
    assert_eq!(other.game().state(), &before);
}

#[test]
fn resign_ends_the_game() {
    let mut session = Session::new(quick_config());
    let out = run(&mut session, "resign").unwrap();
    assert_eq!(out, "white resigns, black wins\n");
    assert_eq!(session.resigned(), Some(Color::White));

    let err = run(&mut session, "move e2e4").unwrap_err();
    assert!(matches!(err.downcast_ref::<ChessError>(), Some(ChessError::GameOver)));
    assert!(run(&mut session, "go").is_err());
    assert!(run(&mut session, "resign").is_err());

    run(&mut session, "new").unwrap();
    assert_eq!(session.resigned(), None);
}

#[test]
fn hint_does_not_play() {
    let mut session = session_at("6k1/5ppp/8/8/8/8/8/R5K1 w - -");
    let out = run(&mut session, "hint").unwrap();
    assert!(out.starts_with("hint: a1a8"), "{out}");
    assert!(session.game().history().is_empty());
}

#[test]
fn engine_mates_with_go() {
    let mut session = session_at("6k1/5ppp/8/8/8/8/8/R5K1 w - -");
    let out = run(&mut session, "go").unwrap();
    assert!(out.contains("checkmate, white wins"), "{out}");
    assert!(run(&mut session, "go").is_err());
}

#[test]
fn second_pawn_capture_readies_curse() {
    let mut session = session_at("4k3/8/8/3p4/4P3/8/8/4K3 w - -");
    let id = session.game().board().get(sq("e4")).unwrap().id;
    session.game.piece_by_id_mut(id).unwrap().capture_count = 1;

    let out = run(&mut session, "move e4d5").unwrap();
    assert!(out.contains("white pawn on d5 is cursed"), "{out}");
    let at = session.game().board().find_by_id(id).unwrap();
    assert!(session.game().board().get(at).unwrap().special_ready);
}

#[test]
fn pawn_curse_grants_king_steps() {
    let mut session = session_at("4k3/8/8/3pp3/4Pp2/8/8/4K3 w - -");
    assert!(run(&mut session, "curse e4").is_err());

    let id = session.game().board().get(sq("e4")).unwrap().id;
    session.game.piece_by_id_mut(id).unwrap().special_ready = true;
    let out = run(&mut session, "curse e4").unwrap();
    assert!(out.contains("moves like a king"), "{out}");

    let pawn = session.game().board().get(sq("e4")).unwrap();
    assert!(pawn.special_used);
    assert!(!pawn.special_ready);
    assert!(session.game().legal_moves(sq("e4")).contains(&sq("e3")));
    // Activation does not use up the turn.
    assert_eq!(session.game().turn(), Color::White);
}

#[test]
fn knight_curse_swaps_and_passes_turn() {
    let mut session = Session::new(quick_config());
    let knight = session.game().board().get(sq("b1")).unwrap().id;
    session.game.piece_by_id_mut(knight).unwrap().special_ready = true;

    // Without a target nothing is spent.
    assert!(run(&mut session, "curse b1").is_err());
    assert!(session.game().board().get(sq("b1")).unwrap().special_ready);

    let out = run(&mut session, "curse b1 d2").unwrap();
    assert!(out.contains("swaps b1 and d2"), "{out}");
    let moved = session.game().board().get(sq("d2")).unwrap();
    assert_eq!(moved.id, knight);
    assert!(moved.special_used);
    assert_eq!(session.game().board().get(sq("b1")).map(|p| p.kind), Some(PieceKind::Pawn));
    // The engine answered for black.
    assert_eq!(session.game().turn(), Color::White);
    assert_eq!(session.game().history().len(), 1);
}

#[test]
fn misc_commands() {
    let mut session = Session::new(quick_config());
    assert_eq!(session.handle("", &mut Vec::new()).unwrap(), Flow::Continue);
    assert_eq!(session.handle("quit", &mut Vec::new()).unwrap(), Flow::Quit);
    assert!(run(&mut session, "castle").is_err());
    let board = run(&mut session, "board").unwrap();
    assert!(board.starts_with("8 r n b q k b n r"));
    assert!(board.ends_with("white to move\n"));
}
