//! Text rendering of the board.

use chess_rules::{Coord, PieceKind, Side, Snapshot};

use crate::config::{Config, Glyphs};
use crate::game::GameState;

/// Symbol for one piece in the configured glyph set.
pub fn piece_char(glyphs: Glyphs, side: Side, kind: PieceKind) -> char {
    match glyphs {
        Glyphs::Ascii => {
            let ch = kind.letter();
            if side == Side::White {
                ch.to_ascii_uppercase()
            } else {
                ch
            }
        }
        Glyphs::Unicode => match (side, kind) {
            (Side::White, PieceKind::King) => '♔',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::Black, PieceKind::King) => '♚',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Pawn) => '♟',
        },
    }
}

/// Draw the board. Each square is three characters wide: the piece (or `.`)
/// between two markers. `[x]` is the selected piece, `(x)` a legal
/// destination, `<x>` the squares of the last move.
pub fn render_board(game: &GameState, config: &Config) -> String {
    let snap: Snapshot = game.board.snapshot();
    let mut out = String::new();
    for row in axis(config.flipped) {
        if config.show_coordinates {
            out.push_str(&format!("{} ", 8 - row));
        }
        for col in axis(config.flipped) {
            let c = Coord::new(row, col);
            let body = snap
                .get(c)
                .map_or('.', |(kind, side)| piece_char(config.glyphs, side, kind));
            let (open, close) = markers(game, config, c);
            out.push(open);
            out.push(body);
            out.push(close);
        }
        out.push('\n');
    }

    if config.show_coordinates {
        out.push_str("  ");
        for col in axis(config.flipped) {
            out.push(' ');
            out.push((b'a' + col) as char);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Row or column indices in drawing order.
fn axis(flipped: bool) -> Vec<u8> {
    if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    }
}

fn markers(game: &GameState, config: &Config, c: Coord) -> (char, char) {
    if game.selected_square == Some(c) {
        ('[', ']')
    } else if config.highlight_destinations && game.legal_from_selected.contains(&c) {
        ('(', ')')
    } else if game.last_move.is_some_and(|(from, to)| from == c || to == c) {
        ('<', '>')
    } else {
        (' ', ' ')
    }
}
