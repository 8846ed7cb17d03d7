use super::*;

const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("test FEN")
}

#[test]
fn test_fools_mate() {
    let b = board(FOOLS_MATE);
    assert!(b.in_check(Side::White));
    assert!(!b.has_any_legal_move(Side::White));
    assert!(b.is_checkmate(Side::White));
    assert!(!b.is_stalemate(Side::White));
    assert_eq!(b.status(), GameStatus::Checkmate { winner: Side::Black });
}

#[test]
fn test_back_rank_mate() {
    let b = board("R5k1/5ppp/8/8/8/8/8/6K1 b - -");
    assert!(b.is_checkmate(Side::Black));
    assert!(!b.is_checkmate(Side::White));
}

#[test]
fn test_stalemates() {
    for fen in ["k7/2K5/1Q6/8/8/8/8/8 b - -", "6k1/6P1/6K1/8/8/8/8/8 b - -"] {
        let b = board(fen);
        assert!(b.is_stalemate(Side::Black), "{fen}");
        assert!(!b.is_checkmate(Side::Black), "{fen}");
        assert!(b.has_any_legal_move(Side::White), "{fen}");
        assert_eq!(b.status(), GameStatus::Stalemate);
        assert!(b.status().is_terminal());
    }
}

#[test]
fn test_check_with_escape() {
    let b = board("4k3/8/8/8/8/8/8/4R1K1 b - -");
    assert!(b.in_check(Side::Black));
    assert!(!b.is_checkmate(Side::Black));
    assert_eq!(b.status(), GameStatus::Check(Side::Black));
    assert!(!b.status().is_terminal());
}

#[test]
fn test_new_game_is_ongoing() {
    let b = Board::new_game();
    assert_eq!(b.status(), GameStatus::Ongoing);
    assert!(b.has_any_legal_move(Side::White));
    assert!(b.has_any_legal_move(Side::Black));
}

#[test]
fn test_queries_do_not_mutate() {
    let b = board(FOOLS_MATE);
    let before = b.clone();
    for _ in 0..3 {
        b.is_checkmate(Side::White);
        b.is_stalemate(Side::Black);
        b.status();
    }
    assert_eq!(b, before);
}
