//! Move validation and execution.
//!
//! Every candidate move is played on a private copy of the board. The caller's
//! board is replaced by that copy only once the move has passed every check,
//! so a rejected move never leaves a trace.

use std::collections::BTreeSet;

use log::{debug, trace};
use thiserror::Error;

use crate::{
    board::Board,
    pieces::{self, Shape},
    types::*,
};

/// Why a castle attempt was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CastlingBlock {
    #[error("the king has already moved")]
    KingMoved,
    #[error("there is no rook in that corner")]
    RookMissing,
    #[error("the rook has already moved")]
    RookMoved,
    #[error("the squares between king and rook are not empty")]
    PathBlocked,
    #[error("the king is in check")]
    KingInCheck,
    #[error("the king would pass through or land on an attacked square")]
    PathAttacked,
}

/// Reasons `apply` refuses a move, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("there is no piece on the source square")]
    NoPieceAtSource,
    #[error("that piece belongs to the side not on move")]
    WrongSideToMove,
    #[error("the piece cannot move that way")]
    IllegalShape,
    #[error("the destination holds a piece of the same side")]
    OwnPieceAtDestination,
    #[error("castling unavailable: {0}")]
    CastlingUnavailable(CastlingBlock),
    #[error("the move would leave the king in check")]
    SelfCheck,
    #[error("a promotion piece must be chosen")]
    MissingPromotionChoice,
    #[error("cannot promote to {0}")]
    InvalidPromotionChoice(PieceKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    fn rook_from_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    fn rook_to_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
}

/// What a committed move did, for display updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub from: Coord,
    pub to: Coord,
    pub moved: PieceKind,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
    pub next_turn: Side,
}

impl Outcome {
    pub fn is_castle(&self) -> bool {
        self.castle.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

/// A fully validated move: the resulting board plus its summary.
struct Plan {
    next: Board,
    outcome: Outcome,
}

impl Board {
    /// Validate and play `mv` for the side to move.
    ///
    /// On rejection the board is untouched.
    pub fn apply(&mut self, mv: Move) -> Result<Outcome, Rejection> {
        match plan(self, mv, self.turn()) {
            Ok(Plan { next, outcome }) => {
                *self = next;
                debug!("{mv}: {outcome:?}");
                Ok(outcome)
            }
            Err(reason) => {
                debug!("{mv} rejected: {reason}");
                Err(reason)
            }
        }
    }

    /// Squares the piece on `from` may legally move to. Empty when the square
    /// is empty or holds a piece of the side not on move.
    pub fn legal_destinations(&self, from: Coord) -> BTreeSet<Coord> {
        let turn = self.turn();
        if !self.piece_at(from).is_some_and(|p| p.side == turn) {
            return BTreeSet::new();
        }
        Coord::all()
            .filter(|&to| is_legal_for(self, from, to, turn))
            .collect()
    }

    /// Whether moving the piece on `from` to `to` would promote a pawn, so
    /// the caller has to supply a promotion choice.
    pub fn needs_promotion(&self, from: Coord, to: Coord) -> bool {
        self.piece_at(from)
            .is_some_and(|p| p.kind == PieceKind::Pawn && to.row() as i8 == p.side.promotion_row())
    }
}

/// Every legal move for the side to move, one entry per promotion choice.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let turn = board.turn();
    let mut out = Vec::with_capacity(64);
    for piece in board.pieces_of(turn) {
        let from = piece.position;
        for to in Coord::all() {
            if !is_legal_for(board, from, to, turn) {
                continue;
            }
            if board.needs_promotion(from, to) {
                out.extend(
                    PieceKind::PROMOTIONS
                        .iter()
                        .map(|&k| Move::with_promotion(from, to, k)),
                );
            } else {
                out.push(Move::new(from, to));
            }
        }
    }
    trace!("{} legal moves for {turn}", out.len());
    out
}

/// Full legality of `from -> to` for `side`, regardless of whose turn it is.
/// Promotion moves are tested with a queen; the choice cannot change legality.
pub(crate) fn is_legal_for(board: &Board, from: Coord, to: Coord, side: Side) -> bool {
    plan(board, Move::with_promotion(from, to, PieceKind::Queen), side).is_ok()
}

fn plan(board: &Board, mv: Move, mover: Side) -> Result<Plan, Rejection> {
    let piece = board.piece_at(mv.from).ok_or(Rejection::NoPieceAtSource)?;
    if piece.side != mover {
        return Err(Rejection::WrongSideToMove);
    }

    let shape = pieces::shape(&piece, board, mv.to);
    if shape == Shape::Illegal {
        return Err(Rejection::IllegalShape);
    }
    if board.piece_at(mv.to).is_some_and(|p| p.side == mover) {
        return Err(Rejection::OwnPieceAtDestination);
    }

    match shape {
        Shape::Castle => plan_castle(board, piece, mv.to),
        _ => plan_normal(board, piece, mv),
    }
}

fn plan_normal(board: &Board, piece: Piece, mv: Move) -> Result<Plan, Rejection> {
    let mover = piece.side;
    let mut next = board.clone();
    let captured = next.relocate(mv.from, mv.to);
    next.set_turn(mover.other());

    if next.in_check(mover) {
        return Err(Rejection::SelfCheck);
    }

    let mut promotion = None;
    if board.needs_promotion(mv.from, mv.to) {
        let kind = mv.promotion.ok_or(Rejection::MissingPromotionChoice)?;
        if !kind.is_promotion_target() {
            return Err(Rejection::InvalidPromotionChoice(kind));
        }
        let mut promoted = Piece::new(kind, mover, mv.to);
        promoted.has_moved = true;
        next.put(promoted);
        promotion = Some(kind);
    }

    Ok(Plan {
        next,
        outcome: Outcome {
            from: mv.from,
            to: mv.to,
            moved: piece.kind,
            captured,
            castle: None,
            promotion,
            next_turn: mover.other(),
        },
    })
}

fn plan_castle(board: &Board, king: Piece, to: Coord) -> Result<Plan, Rejection> {
    let blocked = Rejection::CastlingUnavailable;
    let mover = king.side;
    let from = king.position;
    if king.has_moved {
        return Err(blocked(CastlingBlock::KingMoved));
    }

    let side = if to.col() > from.col() {
        CastleSide::KingSide
    } else {
        CastleSide::QueenSide
    };
    let rook_from = Coord::new(from.row(), side.rook_from_col());
    let rook = board
        .piece_at(rook_from)
        .filter(|p| p.kind == PieceKind::Rook && p.side == mover)
        .ok_or(blocked(CastlingBlock::RookMissing))?;
    if rook.has_moved {
        return Err(blocked(CastlingBlock::RookMoved));
    }
    if !pieces::path_clear(board, from, rook_from) {
        return Err(blocked(CastlingBlock::PathBlocked));
    }
    if board.in_check(mover) {
        return Err(blocked(CastlingBlock::KingInCheck));
    }

    let (lo, hi) = (from.col().min(to.col()), from.col().max(to.col()));
    let enemy = mover.other();
    if (lo..=hi).any(|col| board.square_attacked(Coord::new(from.row(), col), enemy)) {
        return Err(blocked(CastlingBlock::PathAttacked));
    }

    let mut next = board.clone();
    next.relocate(from, to);
    next.relocate(rook_from, Coord::new(from.row(), side.rook_to_col()));
    next.set_turn(enemy);
    if next.in_check(mover) {
        return Err(Rejection::SelfCheck);
    }

    Ok(Plan {
        next,
        outcome: Outcome {
            from,
            to,
            moved: PieceKind::King,
            captured: None,
            castle: Some(side),
            promotion: None,
            next_turn: enemy,
        },
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
