use crate::{board::Board, engine::legal_moves};

/// Pure perft node count.
/// Counts all legal move paths from the current position down to `depth`.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut next = board.clone();
        if next.apply(mv).is_ok() {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}
