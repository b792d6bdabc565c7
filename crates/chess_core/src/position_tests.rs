use super::*;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn sq(label: &str) -> Coord {
    Coord::from_label(label).unwrap()
}

fn find(pos: &Position, from: &str, to: &str) -> Move {
    pos.legal_moves()
        .into_iter()
        .find(|m| m.from == sq(from) && m.to == sq(to))
        .unwrap_or_else(|| panic!("{from}{to} is not legal"))
}

#[test]
fn test_start_fen_matches_startpos() {
    assert_eq!(Position::from_fen(START_FEN).unwrap(), Position::startpos());
}

#[test]
fn test_invalid_fen_is_rejected() {
    for fen in [
        "",
        "8/8/8/8/8/8/8 w - -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq -",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9",
    ] {
        assert!(
            matches!(Position::from_fen(fen), Err(ChessError::InvalidFen(_))),
            "accepted {fen:?}"
        );
    }
}

#[test]
fn test_square_labels() {
    assert_eq!(Coord::new(0, 4).label(), "e8");
    assert_eq!(Coord::new(7, 0).label(), "a1");
    assert_eq!(Coord::from_label("e8"), Some(Coord::new(0, 4)));
    assert_eq!(Coord::from_label("h1"), Some(Coord::new(7, 7)));
    assert_eq!(Coord::from_label("i1"), None);
    assert_eq!(Coord::from_label("a9"), None);
    assert_eq!(Coord::from_label("a10"), None);
    assert!("e4".parse::<Coord>().is_ok());
    assert!(matches!("zz".parse::<Coord>(), Err(ChessError::InvalidSquare(_))));
}

#[test]
fn test_double_push_sets_and_next_move_clears_en_passant() {
    let mut pos = Position::startpos();
    let mv = find(&pos, "e2", "e4");
    pos.make_move(&mv);
    assert_eq!(pos.en_passant, Some(sq("e3")));
    assert_eq!(pos.side_to_move, Color::Black);

    let mv = find(&pos, "g8", "f6");
    pos.make_move(&mv);
    assert_eq!(pos.en_passant, None);
}

#[test]
fn test_rook_move_drops_only_its_side() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    pos.make_move(&find(&pos, "h1", "h2"));
    assert!(!pos.castling.white.kingside);
    assert!(pos.castling.white.queenside);
    assert_eq!(pos.castling.black, CastlingRights::all().black);
}

#[test]
fn test_capturing_rook_on_home_square_drops_owner_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K1NR b KQkq -").unwrap();
    // Black rook a8 runs down the file and takes the a1 rook.
    pos.make_move(&find(&pos, "a8", "a1"));
    assert!(!pos.castling.white.queenside);
    assert!(pos.castling.white.kingside);
    assert!(!pos.castling.black.queenside);
}

#[test]
fn test_with_move_leaves_original_untouched() {
    let pos = Position::startpos();
    let mv = find(&pos, "g1", "f3");
    let next = pos.with_move(&mv);
    assert_eq!(pos, Position::startpos());
    assert_eq!(next.piece_at(sq("f3")).map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(next.piece_at(sq("f3")).map(|p| p.id), pos.piece_at(sq("g1")).map(|p| p.id));
}

#[test]
fn test_promotion_keeps_piece_identity() {
    let mut pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - -").unwrap();
    let id = pos.piece_at(sq("b7")).unwrap().id;
    let mv = pos
        .legal_moves()
        .into_iter()
        .find(|m| m.promotion == Some(PieceKind::Rook))
        .unwrap();
    let applied = pos.make_move(&mv).unwrap();
    assert_eq!(applied.piece.kind, PieceKind::Pawn);
    let promoted = pos.piece_at(sq("b8")).unwrap();
    assert_eq!(promoted.kind, PieceKind::Rook);
    assert_eq!(promoted.id, id);
}
