//! Per-kind movement rules.
//!
//! Everything here is a pure predicate over a board snapshot. Nothing in this
//! module knows about whose turn it is or whether a move exposes the mover's
//! king; those filters live in the move engine.

use crate::{board::Board, types::*};

/// Geometric verdict of a piece's movement rule for one destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The rule does not allow this destination.
    Illegal,
    /// The rule allows this destination. The occupant, if any, may still be
    /// a friendly piece; see [`is_valid_move`].
    Legal,
    /// A two-square horizontal king step. Only the move engine can decide
    /// whether it is a legal castle.
    Castle,
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Movement shape of `piece` travelling to `to`.
///
/// Path blocking is taken into account. The side of a piece standing on `to`
/// is not, except where the pawn rule depends on occupancy.
pub fn shape(piece: &Piece, board: &Board, to: Coord) -> Shape {
    let from = piece.position;
    if from == to {
        return Shape::Illegal;
    }
    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;

    let legal = match piece.kind {
        PieceKind::Pawn => pawn_shape(piece, board, to, dr, dc),
        PieceKind::Knight => knight_shape(dr, dc),
        PieceKind::Bishop => bishop_shape(board, from, to, dr, dc),
        PieceKind::Rook => rook_shape(board, from, to, dr, dc),
        PieceKind::Queen => {
            rook_shape(board, from, to, dr, dc) || bishop_shape(board, from, to, dr, dc)
        }
        PieceKind::King => {
            if dr == 0 && dc.abs() == 2 {
                return Shape::Castle;
            }
            dr.abs() <= 1 && dc.abs() <= 1
        }
    };

    if legal { Shape::Legal } else { Shape::Illegal }
}

/// Full per-piece legality: the movement rule accepts `to` and the square is
/// empty or held by the opposing side. Castle-shaped king moves are never
/// accepted here.
pub fn is_valid_move(piece: &Piece, board: &Board, to: Coord) -> bool {
    shape(piece, board, to) == Shape::Legal && !holds_friend(board, piece.side, to)
}

/// Whether `piece` attacks `target`, irrespective of what stands there.
///
/// Pawns attack both forward diagonals even when the square is empty; every
/// other kind attacks exactly the squares its movement rule reaches.
pub fn attacks(piece: &Piece, board: &Board, target: Coord) -> bool {
    match piece.kind {
        PieceKind::Pawn => {
            let dr = target.row() as i8 - piece.position.row() as i8;
            let dc = target.col() as i8 - piece.position.col() as i8;
            dr == piece.side.forward() && dc.abs() == 1
        }
        _ => shape(piece, board, target) == Shape::Legal,
    }
}

fn holds_friend(board: &Board, side: Side, to: Coord) -> bool {
    board.piece_at(to).is_some_and(|p| p.side == side)
}

fn pawn_shape(piece: &Piece, board: &Board, to: Coord, dr: i8, dc: i8) -> bool {
    let dir = piece.side.forward();
    let target = board.piece_at(to);

    if dc == 0 {
        if target.is_some() {
            return false;
        }
        if dr == dir {
            return true;
        }
        // Double step from the starting row over an empty square.
        return dr == 2 * dir
            && piece.position.row() as i8 == piece.side.pawn_row()
            && piece
                .position
                .offset(dir, 0)
                .is_some_and(|mid| board.piece_at(mid).is_none());
    }

    // Diagonal steps only capture.
    dc.abs() == 1 && dr == dir && target.is_some()
}

fn knight_shape(dr: i8, dc: i8) -> bool {
    KNIGHT_DELTAS.contains(&(dr, dc))
}

fn bishop_shape(board: &Board, from: Coord, to: Coord, dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs() && path_clear(board, from, to)
}

fn rook_shape(board: &Board, from: Coord, to: Coord, dr: i8, dc: i8) -> bool {
    ((dr == 0) != (dc == 0)) && path_clear(board, from, to)
}

/// True when every square strictly between `from` and `to` is empty.
/// Callers guarantee the two squares share a line or a diagonal.
pub(crate) fn path_clear(board: &Board, from: Coord, to: Coord) -> bool {
    let step_r = (to.row() as i8 - from.row() as i8).signum();
    let step_c = (to.col() as i8 - from.col() as i8).signum();
    let mut cur = from.offset(step_r, step_c);
    while let Some(c) = cur {
        if c == to {
            return true;
        }
        if board.piece_at(c).is_some() {
            return false;
        }
        cur = c.offset(step_r, step_c);
    }
    true
}

#[cfg(test)]
#[path = "pieces_tests.rs"]
mod pieces_tests;
