use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Authoritative game state: an 8x8 grid plus the side to move.
///
/// Fields are private so that every mutation goes through the move engine;
/// readers use [`Board::piece_at`], [`Board::pieces`] and [`Board::snapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    turn: Side,
}

/// Read-only view of the grid for rendering: kind and side per square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: [[Option<(PieceKind, Side)>; 8]; 8],
}

impl Snapshot {
    pub fn get(&self, c: Coord) -> Option<(PieceKind, Side)> {
        self.grid[c.row() as usize][c.col() as usize]
    }

    pub fn piece_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 8 rows in piece placement, found {0}")]
    RowCount(usize),
    #[error("row {row} does not describe exactly 8 squares")]
    RowWidth { row: usize },
    #[error("invalid piece letter {0:?}")]
    PieceLetter(char),
    #[error("invalid side to move {0:?}")]
    SideToMove(String),
    #[error("invalid castling field {0:?}")]
    Castling(String),
    #[error("missing {0} field")]
    Missing(&'static str),
    #[error("pawn on {0}, a back rank")]
    PawnOnBackRow(Coord),
    #[error("{0} must have exactly one king")]
    KingCount(Side),
    #[error("{0} is in check but it is not their move")]
    WaitingSideInCheck(Side),
}

impl Board {
    /// Standard starting layout, White to move, nothing moved yet.
    pub fn new_game() -> Self {
        let mut b = Board::empty(Side::White);
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            for side in [Side::White, Side::Black] {
                b.put(Piece::new(kind, side, Coord::new(side.back_row() as u8, col)));
                b.put(Piece::new(
                    PieceKind::Pawn,
                    side,
                    Coord::new(side.pawn_row() as u8, col),
                ));
            }
        }
        b
    }

    /// Empty grid. Only reachable from inside the crate; external callers
    /// build custom positions through [`Board::from_fen`].
    pub(crate) fn empty(turn: Side) -> Self {
        Board {
            grid: [[None; 8]; 8],
            turn,
        }
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        self.grid[c.row() as usize][c.col() as usize]
    }

    /// All pieces on the board in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().filter_map(|c| *c)
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.side == side)
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut grid = [[None; 8]; 8];
        for p in self.pieces() {
            grid[p.position.row() as usize][p.position.col() as usize] = Some((p.kind, p.side));
        }
        Snapshot { grid }
    }

    /// Place a piece on the square named by its own position.
    pub(crate) fn put(&mut self, piece: Piece) {
        let c = piece.position;
        self.grid[c.row() as usize][c.col() as usize] = Some(piece);
    }

    pub(crate) fn take(&mut self, c: Coord) -> Option<Piece> {
        self.grid[c.row() as usize][c.col() as usize].take()
    }

    /// Lift the piece on `from` and drop it on `to`, returning whatever was
    /// captured there. The mover's position and moved flag are updated.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let mut piece = self
            .take(from)
            .unwrap_or_else(|| panic!("no piece on {from} to relocate"));
        let captured = self.take(to);
        piece.position = to;
        piece.has_moved = true;
        self.put(piece);
        captured
    }

    pub(crate) fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// Parse a position from FEN.
    ///
    /// Only the first three fields are read: placement, side to move and
    /// (optionally) castling availability. Kings and rooks on their home
    /// squares count as unmoved only when the castling field grants the
    /// matching right, pawns only on their starting row, and other pieces
    /// only on their standard starting squares.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Missing("piece placement"))?;
        let side = match fields.next() {
            Some("w") => Side::White,
            Some("b") => Side::Black,
            Some(other) => return Err(FenError::SideToMove(other.to_string())),
            None => return Err(FenError::Missing("side to move")),
        };
        let castling = fields.next().unwrap_or("-");
        if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
            return Err(FenError::Castling(castling.to_string()));
        }

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::RowCount(rows.len()));
        }

        let mut board = Board::empty(side);
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in text.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or(FenError::PieceLetter(ch))?;
                    let side = if ch.is_ascii_uppercase() {
                        Side::White
                    } else {
                        Side::Black
                    };
                    if col >= 8 {
                        return Err(FenError::RowWidth { row });
                    }
                    let pos = Coord::new(row as u8, col as u8);
                    if kind == PieceKind::Pawn && (row == 0 || row == 7) {
                        return Err(FenError::PawnOnBackRow(pos));
                    }
                    let mut piece = Piece::new(kind, side, pos);
                    piece.has_moved = !starts_unmoved(&piece, castling);
                    board.put(piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(FenError::RowWidth { row });
            }
        }

        for side in [Side::White, Side::Black] {
            let kings = board
                .pieces_of(side)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(side));
            }
        }
        // A capturable king would let the side to move take it.
        let waiting = board.turn.other();
        if board.in_check(waiting) {
            return Err(FenError::WaitingSideInCheck(waiting));
        }
        Ok(board)
    }

    /// FEN placement, side to move and castling availability as implied by
    /// the moved flags. Move counters are written as `- 0 1`.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.grid[row][col] {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.turn {
            Side::White => 'w',
            Side::Black => 'b',
        });

        let mut rights = String::new();
        for (side, letters) in [(Side::White, ['K', 'Q']), (Side::Black, ['k', 'q'])] {
            let row = side.back_row() as u8;
            let king_home = self
                .piece_at(Coord::new(row, 4))
                .is_some_and(|p| p.kind == PieceKind::King && p.side == side && !p.has_moved);
            if !king_home {
                continue;
            }
            for (letter, col) in letters.into_iter().zip([7u8, 0]) {
                let rook_home = self
                    .piece_at(Coord::new(row, col))
                    .is_some_and(|p| p.kind == PieceKind::Rook && p.side == side && !p.has_moved);
                if rook_home {
                    rights.push(letter);
                }
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        out.push(' ');
        out.push_str(&rights);
        out.push_str(" - 0 1");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new_game()
    }
}

/// Moved-flag inference for FEN import.
fn starts_unmoved(piece: &Piece, castling: &str) -> bool {
    let pos = piece.position;
    let side = piece.side;
    let home_row = side.back_row() as u8;
    let (king_side, queen_side) = match side {
        Side::White => ('K', 'Q'),
        Side::Black => ('k', 'q'),
    };
    match piece.kind {
        PieceKind::Pawn => pos.row() == side.pawn_row() as u8,
        PieceKind::King => {
            pos == Coord::new(home_row, 4)
                && (castling.contains(king_side) || castling.contains(queen_side))
        }
        PieceKind::Rook => {
            (pos == Coord::new(home_row, 7) && castling.contains(king_side))
                || (pos == Coord::new(home_row, 0) && castling.contains(queen_side))
        }
        kind => pos.row() == home_row && BACK_RANK[pos.col() as usize] == kind,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                let ch = self.grid[row][col].map_or('.', |p| p.fen_char());
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
