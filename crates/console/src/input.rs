//! Translate typed lines into commands.
//!
//! Squares are named the usual way ("e2"). A move is two squares, optionally
//! joined by a space or dash, with an optional promotion letter: `e7e8q`.

use std::str::FromStr;

use chess_rules::{Coord, ParseCoordError, PieceKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick up the piece on a square and show where it can go.
    Select(Coord),
    Move {
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    },
    /// Answer a pending promotion prompt.
    Promote(PieceKind),
    NewGame,
    Flip,
    Fen,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?} (type 'help')")]
    Unknown(String),
    #[error(transparent)]
    Square(#[from] ParseCoordError),
    #[error("{0:?} is not a promotion piece (q, r, b or n)")]
    Promotion(char),
}

pub const HELP: &str = "\
commands:
  e2            select a piece and show its moves
  e2e4, e2 e4   move (add q/r/b/n to promote, e.g. e7e8q)
  q r b n       answer the promotion prompt
  new           start a new game
  flip          turn the board around
  fen           print the position as FEN
  json          print the board snapshot as JSON
  help          this text
  quit          leave";

impl FromStr for Command {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let text = line.trim().to_ascii_lowercase();
        match text.as_str() {
            "" => return Err(InputError::Empty),
            "new" => return Ok(Command::NewGame),
            "flip" => return Ok(Command::Flip),
            "fen" => return Ok(Command::Fen),
            "json" => return Ok(Command::Json),
            "help" | "?" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),
            "q" | "r" | "b" | "n" => {
                let ch = text.chars().next().unwrap_or('q');
                return promotion_kind(ch).map(Command::Promote);
            }
            _ => {}
        }

        let compact: String = text.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        if !compact.is_ascii() {
            return Err(InputError::Unknown(line.trim().to_string()));
        }
        match compact.len() {
            2 => Ok(Command::Select(compact.parse()?)),
            4 | 5 => {
                let from = compact[0..2].parse()?;
                let to = compact[2..4].parse()?;
                let promotion = match compact[4..].chars().next() {
                    Some(ch) => Some(promotion_kind(ch)?),
                    None => None,
                };
                Ok(Command::Move {
                    from,
                    to,
                    promotion,
                })
            }
            _ => Err(InputError::Unknown(line.trim().to_string())),
        }
    }
}

fn promotion_kind(ch: char) -> Result<PieceKind, InputError> {
    PieceKind::from_letter(ch)
        .filter(|k| k.is_promotion_target())
        .ok_or(InputError::Promotion(ch))
}
