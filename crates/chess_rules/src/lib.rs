//! Chess rules engine.
//!
//! Holds the authoritative board, decides whether a proposed move is legal,
//! plays it, and reports check, checkmate and stalemate. Rendering and input
//! belong to a presentation layer built on top of this crate.
//!
//! ```
//! use chess_rules::{new_game, Coord, Move, Side};
//!
//! let mut board = new_game();
//! let e2: Coord = "e2".parse().unwrap();
//! let e4: Coord = "e4".parse().unwrap();
//! board.apply(Move::new(e2, e4)).unwrap();
//! assert_eq!(board.turn(), Side::Black);
//! ```

pub mod analysis;
pub mod attacks;
pub mod board;
pub mod engine;
pub mod perft;
pub mod pieces;
pub mod types;

pub use analysis::*;
pub use board::*;
pub use engine::*;
pub use perft::perft;
pub use pieces::{is_valid_move, Shape};
pub use types::*;

/// A fresh game in the standard starting position, White to move.
pub fn new_game() -> Board {
    Board::new_game()
}
