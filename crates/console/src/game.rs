//! Game session state for the console: the board plus what the player has
//! selected and whether a promotion answer is outstanding.

use std::collections::BTreeSet;

use chess_rules::{Board, Coord, GameStatus, Move, Outcome, PieceKind, Rejection, Side};
use log::info;

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    WhiteWins,
    BlackWins,
    Stalemate,
}

/// What happened in response to a player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Selected { from: Coord, destinations: usize },
    Deselected,
    Moved(Outcome),
    /// The move is legal but a promotion piece is needed before it can be played.
    PromotionPending { from: Coord, to: Coord },
    Rejected(Rejection),
    /// Input arrived after the game ended.
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub selected_square: Option<Coord>,
    pub legal_from_selected: BTreeSet<Coord>,
    pub last_move: Option<(Coord, Coord)>,
    pub pending_promotion: Option<(Coord, Coord)>,
    pub result: GameResult,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::from_board(Board::new_game())
    }

    pub fn from_board(board: Board) -> Self {
        let mut game = Self {
            board,
            selected_square: None,
            legal_from_selected: BTreeSet::new(),
            last_move: None,
            pending_promotion: None,
            result: GameResult::InProgress,
        };
        game.check_game_end();
        game
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Select a square. Selecting one of the mover's pieces shows its legal
    /// destinations; selecting a highlighted destination plays the move.
    pub fn select_square(&mut self, sq: Coord) -> Event {
        if self.result != GameResult::InProgress {
            return Event::GameOver;
        }
        if let Some(piece) = self.board.piece_at(sq)
            && piece.side == self.board.turn()
        {
            self.selected_square = Some(sq);
            self.legal_from_selected = self.board.legal_destinations(sq);
            return Event::Selected {
                from: sq,
                destinations: self.legal_from_selected.len(),
            };
        }

        if let Some(from) = self.selected_square
            && self.legal_from_selected.contains(&sq)
        {
            return self.submit(Move::new(from, sq));
        }

        self.clear_selection();
        Event::Deselected
    }

    /// Submit a complete or partial move to the engine.
    ///
    /// A pawn move to the last row without a choice parks the move until
    /// [`GameState::choose_promotion`] supplies one.
    pub fn submit(&mut self, mv: Move) -> Event {
        if self.result != GameResult::InProgress {
            return Event::GameOver;
        }
        self.pending_promotion = None;
        match self.board.apply(mv) {
            Ok(outcome) => {
                self.last_move = Some((mv.from, mv.to));
                self.clear_selection();
                self.check_game_end();
                Event::Moved(outcome)
            }
            Err(Rejection::MissingPromotionChoice) => {
                self.pending_promotion = Some((mv.from, mv.to));
                Event::PromotionPending {
                    from: mv.from,
                    to: mv.to,
                }
            }
            Err(reason) => Event::Rejected(reason),
        }
    }

    /// Resubmit the parked move with the chosen piece.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Option<Event> {
        let (from, to) = self.pending_promotion.take()?;
        Some(self.submit(Move::with_promotion(from, to, kind)))
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.legal_from_selected.clear();
    }

    /// Check if the game has ended
    fn check_game_end(&mut self) {
        self.result = match self.board.status() {
            GameStatus::Checkmate { winner: Side::White } => GameResult::WhiteWins,
            GameStatus::Checkmate { winner: Side::Black } => GameResult::BlackWins,
            GameStatus::Stalemate => GameResult::Stalemate,
            GameStatus::Ongoing | GameStatus::Check(_) => GameResult::InProgress,
        };
        if self.result != GameResult::InProgress {
            info!("game over: {:?}", self.result);
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
