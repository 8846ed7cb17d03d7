//! King location and attack detection.
//!
//! Attacks are found by asking every piece of the attacking side whether its
//! movement rule reaches the target square. At 64 squares this brute-force
//! scan is cheap enough that no attack maps are cached.

use crate::{board::Board, pieces, types::*};

impl Board {
    /// Square of `side`'s king.
    ///
    /// Panics if the king is missing: the engine never removes a king, so a
    /// kingless board means a rules bug upstream.
    pub fn king_position(&self, side: Side) -> Coord {
        self.pieces_of(side)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
            .unwrap_or_else(|| panic!("no {side} king on the board"))
    }

    /// Whether any piece of `by` attacks `target`.
    pub fn square_attacked(&self, target: Coord, by: Side) -> bool {
        self.pieces_of(by)
            .any(|p| p.position != target && pieces::attacks(&p, self, target))
    }

    pub fn in_check(&self, side: Side) -> bool {
        self.square_attacked(self.king_position(side), side.other())
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
