//! Terminal chess
//!
//! A thin front end over `chess_rules`:
//! - draws the board after every move
//! - highlights where a selected piece can go
//! - asks for a promotion piece when a pawn reaches the last row
//! - announces check, checkmate and stalemate

mod config;
mod game;
mod input;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_rules::{Board, GameStatus};
use clap::Parser;
use log::debug;

use config::Config;
use game::{Event, GameResult, GameState};
use input::Command;

#[derive(Debug, Parser)]
#[command(name = "chess_console", about = "Play chess in the terminal")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from this FEN position instead of the initial one
    #[arg(long)]
    fen: Option<String>,

    /// Print the board snapshot as JSON after every move
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .target(env_logger::Target::Stderr)
        .init();

    let game = match &args.fen {
        Some(fen) => GameState::from_board(
            Board::from_fen(fen).with_context(|| format!("invalid --fen {fen:?}"))?,
        ),
        None => GameState::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session {
        game,
        config,
        json: args.json,
    };
    session.run(stdin.lock(), stdout.lock())
}

struct Session {
    game: GameState,
    config: Config,
    json: bool,
}

impl Session {
    fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "{}", input::HELP)?;
        self.show(&mut out)?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let command = match line.parse::<Command>() {
                Ok(c) => c,
                Err(input::InputError::Empty) => continue,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };
            debug!("command: {command:?}");
            if command == Command::Quit {
                break;
            }
            self.handle(command, &mut out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        let event = match command {
            Command::Select(sq) => self.game.select_square(sq),
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let mv = match promotion {
                    Some(kind) => chess_rules::Move::with_promotion(from, to, kind),
                    None => chess_rules::Move::new(from, to),
                };
                self.game.submit(mv)
            }
            Command::Promote(kind) => match self.game.choose_promotion(kind) {
                Some(event) => event,
                None => {
                    writeln!(out, "no promotion is pending")?;
                    return Ok(());
                }
            },
            Command::NewGame => {
                self.game.reset();
                return self.show(out);
            }
            Command::Flip => {
                self.config.flipped = !self.config.flipped;
                return self.show(out);
            }
            Command::Fen => {
                writeln!(out, "{}", self.game.board.to_fen())?;
                return Ok(());
            }
            Command::Json => return self.write_json(out),
            Command::Help => {
                writeln!(out, "{}", input::HELP)?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };
        self.report(event, out)
    }

    fn report<W: Write>(&mut self, event: Event, out: &mut W) -> Result<()> {
        match event {
            Event::Selected { from, destinations } => {
                writeln!(out, "{from} selected, {destinations} legal destination(s)")?;
                self.show(out)
            }
            Event::Deselected => {
                writeln!(out, "selection cleared")?;
                Ok(())
            }
            Event::Moved(outcome) => {
                if let Some(captured) = outcome.captured {
                    writeln!(out, "{} captures {}", outcome.moved, captured.kind)?;
                }
                if outcome.is_castle() {
                    writeln!(out, "castled")?;
                }
                if let Some(kind) = outcome.promotion {
                    writeln!(out, "promoted to {kind}")?;
                }
                self.show(out)?;
                if self.json {
                    self.write_json(out)?;
                }
                Ok(())
            }
            Event::PromotionPending { from, to } => {
                writeln!(out, "promote {from}{to} to? (q, r, b, n)")?;
                Ok(())
            }
            Event::Rejected(reason) => {
                writeln!(out, "illegal move: {reason}")?;
                Ok(())
            }
            Event::GameOver => {
                writeln!(out, "the game is over; type 'new' to play again")?;
                Ok(())
            }
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", render::render_board(&self.game, &self.config))?;
        let line = match (self.game.result, self.game.status()) {
            (GameResult::WhiteWins, _) => "checkmate, White wins".to_string(),
            (GameResult::BlackWins, _) => "checkmate, Black wins".to_string(),
            (GameResult::Stalemate, _) => "stalemate, draw".to_string(),
            (_, GameStatus::Check(side)) => format!("{side} to move, in check"),
            _ => format!("{} to move", self.game.board.turn()),
        };
        writeln!(out, "{line}")?;
        Ok(())
    }

    fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = serde_json::json!({
            "snapshot": self.game.board.snapshot(),
            "turn": self.game.board.turn(),
            "status": self.game.status(),
        });
        writeln!(out, "{}", serde_json::to_string(&view)?)?;
        Ok(())
    }
}
