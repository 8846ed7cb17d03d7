use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a forward pawn step. White advances toward row 0.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    pub fn back_row(self) -> i8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    pub fn pawn_row(self) -> i8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    pub fn promotion_row(self) -> i8 {
        self.other().back_row()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    /// Lowercase letter used in FEN and coordinate move text.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A board square as (row, column). Row 0 is Black's back rank (rank 8),
/// column 0 is the a-file.
///
/// Both components are always in `0..8`; deserializing anything else fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoord", into = "RawCoord")]
pub struct Coord {
    row: u8,
    col: u8,
}

/// Unchecked wire form of [`Coord`].
#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawCoord {
    row: u8,
    col: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square ({row}, {col}) is off the board")]
pub struct CoordRangeError {
    pub row: u8,
    pub col: u8,
}

impl TryFrom<RawCoord> for Coord {
    type Error = CoordRangeError;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::checked(raw.row, raw.col)
    }
}

impl From<Coord> for RawCoord {
    fn from(c: Coord) -> Self {
        RawCoord {
            row: c.row,
            col: c.col,
        }
    }
}

impl Coord {
    /// Panics when either component is 8 or more; see [`Coord::checked`].
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "coordinate out of range");
        Self { row, col }
    }

    pub fn checked(row: u8, col: u8) -> Result<Self, CoordRangeError> {
        if row < 8 && col < 8 {
            Ok(Self { row, col })
        } else {
            Err(CoordRangeError { row, col })
        }
    }

    /// Row index, 0 being rank 8.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index, 0 being the a-file.
    pub fn col(self) -> u8 {
        self.col
    }

    /// Checked construction from signed components; `None` when off the board.
    pub fn at(row: i8, col: i8) -> Option<Coord> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The square `(dr, dc)` away, if it is still on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Coord> {
        Coord::at(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Coord { row, col }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        write!(f, "{file}{rank}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square name: {0:?}")]
pub struct ParseCoordError(pub String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(ParseCoordError(s.to_string()));
        }
        let file = b[0].to_ascii_lowercase();
        let rank = b[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ParseCoordError(s.to_string()));
        }
        Ok(Coord {
            row: b'8' - rank,
            col: file - b'a',
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    /// Always equal to the grid cell holding this piece.
    pub position: Coord,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side, position: Coord) -> Self {
        Self {
            kind,
            side,
            position,
            has_moved: false,
        }
    }

    /// FEN letter: uppercase for White.
    pub fn fen_char(&self) -> char {
        match self.side {
            Side::White => self.kind.letter().to_ascii_uppercase(),
            Side::Black => self.kind.letter(),
        }
    }
}

/// A proposed move. `promotion` is required when a pawn reaches its
/// promotion row and ignored otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Coord, to: Coord, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

/// Shorthand for building coordinates from square names in tests.
///
/// Panics on a malformed name. Parse with [`Coord::from_str`] for input that
/// may be wrong.
#[doc(hidden)]
pub fn sq(name: &str) -> Coord {
    name.parse()
        .unwrap_or_else(|e: ParseCoordError| panic!("{e}"))
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
