//! Terminal-state detection.
//!
//! These queries enumerate every (piece, destination) pair of one side and run
//! the full move validation on each, each candidate on its own scratch board.
//! That is up to 64x64 board copies per query, which is fine for a single
//! interactive game.

use serde::{Deserialize, Serialize};

use crate::{board::Board, engine::is_legal_for, types::*};

/// Position summary for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a way out.
    Check(Side),
    Checkmate { winner: Side },
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl Board {
    /// Whether `side` has at least one fully legal move. Stops at the first
    /// one found.
    pub fn has_any_legal_move(&self, side: Side) -> bool {
        self.pieces_of(side).any(|p| {
            Coord::all().any(|to| is_legal_for(self, p.position, to, side))
        })
    }

    pub fn is_checkmate(&self, side: Side) -> bool {
        self.in_check(side) && !self.has_any_legal_move(side)
    }

    pub fn is_stalemate(&self, side: Side) -> bool {
        !self.in_check(side) && !self.has_any_legal_move(side)
    }

    /// Check, mate and stalemate status for the side to move.
    pub fn status(&self) -> GameStatus {
        let side = self.turn();
        let in_check = self.in_check(side);
        match (in_check, self.has_any_legal_move(side)) {
            (true, true) => GameStatus::Check(side),
            (true, false) => GameStatus::Checkmate {
                winner: side.other(),
            },
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        }
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
