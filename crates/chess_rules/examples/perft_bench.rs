//! Timing for the brute-force legality queries.
//!
//! Every legality question here is answered by playing the candidate on a
//! scratch board, so move-path counts and end-of-game checks cost board
//! copies rather than table lookups. This example shows how much.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_rules -- [depth] [fen]

use std::env;
use std::time::Instant;

use chess_rules::{Board, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Castling middlegame",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    (
        "Promotions in check",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    ("Fool's mate", "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -"),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    let positions: Vec<(String, String)> = match args.get(2) {
        Some(fen) => vec![("Custom".to_string(), fen.clone())],
        None => TEST_POSITIONS
            .iter()
            .map(|(n, f)| (n.to_string(), f.to_string()))
            .collect(),
    };

    println!("Depth: {depth}");
    for (name, fen) in positions {
        let board = match Board::from_fen(&fen) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("{name}: {e}");
                continue;
            }
        };

        let start = Instant::now();
        let status = board.status();
        let status_time = start.elapsed();

        let start = Instant::now();
        let nodes = perft(&board, depth);
        let elapsed = start.elapsed();
        let nps = if elapsed.as_secs_f64() > 0.0 {
            nodes as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        println!(
            "{name:.<30} {status:?} in {status_time:.3?}; {nodes:>10} nodes in {elapsed:>8.3?} ({nps:>9.0} nps)"
        );
    }
}
