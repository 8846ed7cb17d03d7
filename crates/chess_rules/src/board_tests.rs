use super::*;

#[test]
fn test_new_game_layout() {
    let b = Board::new_game();
    assert_eq!(b.turn(), Side::White);
    assert_eq!(b.pieces().count(), 32);
    assert!(b.pieces().all(|p| !p.has_moved));

    for (col, &kind) in BACK_RANK.iter().enumerate() {
        let col = col as u8;
        let white = b.piece_at(Coord::new(7, col)).unwrap();
        let black = b.piece_at(Coord::new(0, col)).unwrap();
        assert_eq!((white.kind, white.side), (kind, Side::White));
        assert_eq!((black.kind, black.side), (kind, Side::Black));
        assert_eq!(b.piece_at(Coord::new(6, col)).unwrap().kind, PieceKind::Pawn);
        assert_eq!(b.piece_at(Coord::new(1, col)).unwrap().kind, PieceKind::Pawn);
    }
    for row in 2..6 {
        for col in 0..8 {
            assert!(b.piece_at(Coord::new(row, col)).is_none());
        }
    }
}

#[test]
fn test_positions_match_cells() {
    let b = Board::new_game();
    for c in Coord::all() {
        if let Some(p) = b.piece_at(c) {
            assert_eq!(p.position, c);
        }
    }
}

#[test]
fn test_snapshot_mirrors_grid() {
    let b = Board::new_game();
    let snap = b.snapshot();
    assert_eq!(snap.piece_count(), 32);
    assert_eq!(snap.get(sq("e1")), Some((PieceKind::King, Side::White)));
    assert_eq!(snap.get(sq("d8")), Some((PieceKind::Queen, Side::Black)));
    assert_eq!(snap.get(sq("e4")), None);
}

#[test]
fn test_start_fen_round_trip() {
    let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let b = Board::from_fen(start).unwrap();
    assert_eq!(b, Board::new_game());
    assert_eq!(b.to_fen(), start);
}

#[test]
fn test_fen_moved_flags() {
    let b = Board::from_fen("r3k2r/8/8/8/8/8/4P3/R3K1NR b Kq -").unwrap();
    assert_eq!(b.turn(), Side::Black);
    assert!(!b.piece_at(sq("e1")).unwrap().has_moved);
    assert!(!b.piece_at(sq("h1")).unwrap().has_moved);
    assert!(b.piece_at(sq("a1")).unwrap().has_moved, "no Q right");
    assert!(!b.piece_at(sq("a8")).unwrap().has_moved);
    assert!(b.piece_at(sq("h8")).unwrap().has_moved, "no k right");
    assert!(!b.piece_at(sq("g1")).unwrap().has_moved, "knight on its start square");
    assert!(!b.piece_at(sq("e2")).unwrap().has_moved);
    assert_eq!(b.to_fen(), "r3k2r/8/8/8/8/8/4P3/R3K1NR b Kq - 0 1");
}

#[test]
fn test_fen_without_castling_field() {
    let b = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w").unwrap();
    assert!(b.piece_at(sq("e1")).unwrap().has_moved);
    assert!(b.to_fen().ends_with(" w - - 0 1"));
}

#[test]
fn test_fen_errors() {
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8 w"),
        Err(FenError::RowCount(7))
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K4 w"),
        Err(FenError::RowWidth { row: 7 })
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4X3 w"),
        Err(FenError::PieceLetter('X'))
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 x"),
        Err(FenError::SideToMove("x".to_string()))
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3"),
        Err(FenError::Missing("side to move"))
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/4K3 w"),
        Err(FenError::KingCount(Side::Black))
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w KX"),
        Err(FenError::Castling("KX".to_string()))
    );
}

#[test]
fn test_fen_rejects_pawns_on_back_ranks() {
    assert_eq!(
        Board::from_fen("P3k3/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::PawnOnBackRow(sq("a8")))
    );
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K2p b - -"),
        Err(FenError::PawnOnBackRow(sq("h1")))
    );
    // Own starting rank, one step from promotion: both fine.
    assert!(Board::from_fen("4k3/P7/8/8/8/8/7p/4K3 w - -").is_ok());
}

#[test]
fn test_fen_rejects_capturable_king() {
    // Black king attacked by the rook while White is to move.
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/8/K3R3 w - -"),
        Err(FenError::WaitingSideInCheck(Side::Black))
    );
}

#[test]
fn test_display_shows_ranks_and_files() {
    let text = Board::new_game().to_string();
    let first = text.lines().next().unwrap();
    assert_eq!(first, "8  r n b q k b n r");
    assert!(text.ends_with("a b c d e f g h"));
}
