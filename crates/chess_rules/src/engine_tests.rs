use super::*;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("test FEN")
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

/// Apply a move that must be rejected and check the board did not change.
fn reject(b: &mut Board, m: Move) -> Rejection {
    let before = b.clone();
    let err = b.apply(m).expect_err("move should be rejected");
    assert_eq!(*b, before, "rejected move changed the board");
    err
}

#[test]
fn test_pawn_push_is_committed() {
    let mut b = Board::new_game();
    let out = b.apply(mv("e2", "e4")).unwrap();
    assert_eq!(out.moved, PieceKind::Pawn);
    assert_eq!(out.captured, None);
    assert!(!out.is_castle());
    assert!(!out.is_promotion());
    assert_eq!(out.next_turn, Side::Black);

    assert_eq!(b.turn(), Side::Black);
    assert!(b.piece_at(sq("e2")).is_none());
    let pawn = b.piece_at(sq("e4")).unwrap();
    assert_eq!(pawn.position, sq("e4"));
    assert!(pawn.has_moved);
}

#[test]
fn test_rejection_order() {
    let mut b = Board::new_game();
    assert_eq!(reject(&mut b, mv("e4", "e5")), Rejection::NoPieceAtSource);
    assert_eq!(reject(&mut b, mv("e7", "e5")), Rejection::WrongSideToMove);
    // Wrong side wins over a bad shape.
    assert_eq!(reject(&mut b, mv("e7", "e2")), Rejection::WrongSideToMove);
    assert_eq!(reject(&mut b, mv("e2", "e5")), Rejection::IllegalShape);
    assert_eq!(reject(&mut b, mv("a1", "a2")), Rejection::OwnPieceAtDestination);
    assert_eq!(reject(&mut b, mv("g1", "e2")), Rejection::OwnPieceAtDestination);
    assert_eq!(reject(&mut b, mv("c1", "e3")), Rejection::IllegalShape);
}

#[test]
fn test_capture_is_reported() {
    let mut b = board("4k3/8/8/3p4/4P3/8/8/4K3 w - -");
    let out = b.apply(mv("e4", "d5")).unwrap();
    let captured = out.captured.expect("capture");
    assert_eq!((captured.kind, captured.side), (PieceKind::Pawn, Side::Black));
    assert_eq!(b.pieces_of(Side::Black).count(), 1);
}

#[test]
fn test_pinned_piece_cannot_expose_king() {
    let mut b = board("4k3/4r3/8/8/8/8/4B3/4K3 w - -");
    assert_eq!(reject(&mut b, mv("e2", "d3")), Rejection::SelfCheck);
    assert!(b.legal_destinations(sq("e2")).is_empty());
}

#[test]
fn test_king_cannot_step_into_attack() {
    let mut b = board("4k3/8/8/8/8/8/r7/4K3 w - -");
    assert_eq!(reject(&mut b, mv("e1", "e2")), Rejection::SelfCheck);
    assert!(b.apply(mv("e1", "d1")).is_ok());
}

#[test]
fn test_castle_king_side() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
    let out = b.apply(mv("e1", "g1")).unwrap();
    assert_eq!(out.castle, Some(CastleSide::KingSide));
    assert_eq!(out.next_turn, Side::Black);

    let king = b.piece_at(sq("g1")).unwrap();
    let rook = b.piece_at(sq("f1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(king.has_moved && rook.has_moved);
    assert_eq!(rook.position, sq("f1"));
    assert!(b.piece_at(sq("e1")).is_none());
    assert!(b.piece_at(sq("h1")).is_none());
    assert_eq!(b.turn(), Side::Black);
}

#[test]
fn test_castle_queen_side_for_black() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R b KQkq -");
    let out = b.apply(mv("e8", "c8")).unwrap();
    assert_eq!(out.castle, Some(CastleSide::QueenSide));
    assert_eq!(b.piece_at(sq("c8")).unwrap().kind, PieceKind::King);
    assert_eq!(b.piece_at(sq("d8")).unwrap().kind, PieceKind::Rook);
    assert!(b.piece_at(sq("a8")).is_none());
}

#[test]
fn test_castling_blocks() {
    use CastlingBlock::*;
    let cases = [
        ("r3k2r/8/8/8/8/8/8/R3K2R w kq -", "g1", KingMoved),
        ("4k3/8/8/8/8/8/8/R3K2R w Q -", "g1", RookMoved),
        ("4k3/8/8/8/8/8/8/R3K3 w Q -", "g1", RookMissing),
        ("4k3/8/8/8/8/8/8/RN2K2R w KQ -", "c1", PathBlocked),
        ("4k3/8/8/8/8/8/8/R3K1nR w KQ -", "g1", PathBlocked),
        ("4k3/4r3/8/8/8/8/8/R3K2R w KQ -", "g1", KingInCheck),
        ("4k3/8/b7/8/8/8/8/R3K2R w KQ -", "g1", PathAttacked),
        ("4k3/8/8/8/8/8/4p3/R3K2R w KQ -", "g1", PathAttacked),
        ("4k3/8/8/8/8/8/4p3/R3K2R w KQ -", "c1", PathAttacked),
    ];
    for (fen, to, block) in cases {
        let mut b = board(fen);
        assert_eq!(
            reject(&mut b, mv("e1", to)),
            Rejection::CastlingUnavailable(block),
            "{fen} e1{to}"
        );
    }
}

#[test]
fn test_rook_that_returns_home_stays_moved() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
    for (from, to) in [("h1", "h2"), ("a8", "a7"), ("h2", "h1"), ("a7", "a8")] {
        b.apply(mv(from, to)).unwrap();
    }
    let rook = b.piece_at(sq("h1")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(rook.has_moved);

    assert_eq!(
        reject(&mut b, mv("e1", "g1")),
        Rejection::CastlingUnavailable(CastlingBlock::RookMoved)
    );
    // The untouched a-rook still castles.
    let out = b.apply(mv("e1", "c1")).unwrap();
    assert_eq!(out.castle, Some(CastleSide::QueenSide));
}

#[test]
fn test_king_that_returns_home_cannot_castle() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
    for (from, to) in [("e1", "f1"), ("e8", "f8"), ("f1", "e1"), ("f8", "e8")] {
        b.apply(mv(from, to)).unwrap();
    }
    assert!(b.piece_at(sq("e1")).unwrap().has_moved);
    assert_eq!(
        reject(&mut b, mv("e1", "g1")),
        Rejection::CastlingUnavailable(CastlingBlock::KingMoved)
    );
    assert_eq!(
        reject(&mut b, mv("e1", "c1")),
        Rejection::CastlingUnavailable(CastlingBlock::KingMoved)
    );
    assert_eq!(b.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
}

#[test]
fn test_castle_onto_own_piece() {
    let mut b = board("4k3/8/8/8/8/8/8/R3K1NR w KQ -");
    assert_eq!(reject(&mut b, mv("e1", "g1")), Rejection::OwnPieceAtDestination);
}

#[test]
fn test_queen_side_castle_ignores_attacked_rook_path() {
    // b1 is attacked but the king never crosses it.
    let mut b = board("1r2k3/8/8/8/8/8/8/R3K2R w KQ -");
    assert!(b.apply(mv("e1", "c1")).is_ok());
}

#[test]
fn test_castle_shape_not_on_home_row() {
    let mut b = board("4k3/8/8/8/4K3/8/8/8 w - -");
    assert_eq!(
        reject(&mut b, mv("e4", "g4")),
        Rejection::CastlingUnavailable(CastlingBlock::KingMoved)
    );
}

#[test]
fn test_promotion_needs_a_choice() {
    let mut b = board("4k3/P7/8/8/8/8/8/4K3 w - -");
    assert!(b.needs_promotion(sq("a7"), sq("a8")));
    assert_eq!(reject(&mut b, mv("a7", "a8")), Rejection::MissingPromotionChoice);
    assert_eq!(
        reject(&mut b, Move::with_promotion(sq("a7"), sq("a8"), PieceKind::King)),
        Rejection::InvalidPromotionChoice(PieceKind::King)
    );
    assert_eq!(
        reject(&mut b, Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Pawn)),
        Rejection::InvalidPromotionChoice(PieceKind::Pawn)
    );

    let out = b
        .apply(Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Knight))
        .unwrap();
    assert_eq!(out.promotion, Some(PieceKind::Knight));
    assert_eq!(out.moved, PieceKind::Pawn);
    let knight = b.piece_at(sq("a8")).unwrap();
    assert_eq!((knight.kind, knight.side), (PieceKind::Knight, Side::White));
    assert!(knight.has_moved);
    assert!(b.piece_at(sq("a7")).is_none());
}

#[test]
fn test_black_promotes_with_capture() {
    let mut b = board("4k3/8/8/8/8/8/6p1/4K2R b - -");
    let out = b
        .apply(Move::with_promotion(sq("g2"), sq("h1"), PieceKind::Queen))
        .unwrap();
    assert_eq!(out.captured.map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(b.piece_at(sq("h1")).unwrap().kind, PieceKind::Queen);
    assert!(b.in_check(Side::White));
}

#[test]
fn test_self_check_wins_over_missing_choice() {
    let mut b = board("8/r5PK/8/8/8/8/8/k7 w - -");
    assert_eq!(reject(&mut b, mv("g7", "g8")), Rejection::SelfCheck);
}

#[test]
fn test_choice_ignored_without_promotion() {
    let mut b = Board::new_game();
    let out = b
        .apply(Move::with_promotion(sq("e2"), sq("e4"), PieceKind::Queen))
        .unwrap();
    assert_eq!(out.promotion, None);
    assert_eq!(b.piece_at(sq("e4")).unwrap().kind, PieceKind::Pawn);
}

#[test]
fn test_legal_destinations() {
    let b = Board::new_game();
    let e2: Vec<_> = b.legal_destinations(sq("e2")).into_iter().collect();
    assert_eq!(e2, vec![sq("e4"), sq("e3")]);
    let g1: Vec<_> = b.legal_destinations(sq("g1")).into_iter().collect();
    assert_eq!(g1, vec![sq("f3"), sq("h3")]);
    assert!(b.legal_destinations(sq("e7")).is_empty(), "not Black's turn");
    assert!(b.legal_destinations(sq("e4")).is_empty(), "empty square");
    assert!(b.legal_destinations(sq("a1")).is_empty(), "boxed in");

    let castles = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
    let king = castles.legal_destinations(sq("e1"));
    assert_eq!(king.len(), 7);
    assert!(king.contains(&sq("g1")) && king.contains(&sq("c1")));
}

#[test]
fn test_legal_moves_expand_promotions() {
    assert_eq!(legal_moves(&Board::new_game()).len(), 20);

    let b = board("4k3/P7/8/8/8/8/8/K7 w - -");
    let promotions: Vec<_> = legal_moves(&b)
        .into_iter()
        .filter(|m| m.from == sq("a7"))
        .collect();
    assert_eq!(promotions.len(), 4);
    assert!(promotions.iter().all(|m| m.to == sq("a8") && m.promotion.is_some()));
}
