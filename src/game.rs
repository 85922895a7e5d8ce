//! The move-history state machine: an append-only list of board snapshots
//! plus a step pointer, supporting rewinds to any earlier position.

use crate::board::{Board, Mark, DIMENSION};
use crate::Error;

/// One recorded board snapshot in the game's move sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    board: Board,
}

impl HistoryEntry {
    fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Winner(Mark),
    Draw,
    InProgress(Mark),
}

impl Status {
    /// Winner and Draw are terminal for forward play.
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::InProgress(_))
    }
}

/// Immutable game state. Every transition returns a new value; rejected
/// transitions surface an [`Error`] and leave the original untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    history: Vec<HistoryEntry>,
    step_number: usize,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_dimension(DIMENSION)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        GameState {
            history: vec![HistoryEntry::new(Board::with_dimension(dimension))],
            step_number: 0,
        }
    }

    pub fn current_board(&self) -> &Board {
        &self.history[self.step_number].board
    }

    /// X moves on even steps, so the turn is a function of the step pointer.
    pub fn next_mark(&self) -> Mark {
        if self.step_number % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// Number of recorded positions, including the empty starting board.
    pub fn steps(&self) -> usize {
        self.history.len()
    }

    pub fn status(&self) -> Status {
        let board = self.current_board();
        if let Some(mark) = board.get_winner() {
            Status::Winner(mark)
        } else if board.is_full() {
            Status::Draw
        } else {
            Status::InProgress(self.next_mark())
        }
    }

    /// Marks `index` for whoever moves next. Positions recorded after the
    /// current step are discarded first, so moving after a rewind abandons
    /// that branch of the game.
    pub fn apply_move(&self, index: usize) -> Result<GameState, Error> {
        if self.status().is_over() {
            return Err(Error::GameOver);
        }
        let board = self.current_board();
        if index >= board.size() {
            return Err(Error::InvalidIndex(index));
        }
        if !board.is_valid_move(index) {
            return Err(Error::InvalidMove(index));
        }

        let next_board = board.mark(index, self.next_mark());
        let mut history: Vec<HistoryEntry> = self.history[..=self.step_number].to_vec();
        history.push(HistoryEntry::new(next_board));
        Ok(GameState {
            step_number: history.len() - 1,
            history,
        })
    }

    /// Moves the step pointer without touching the history.
    pub fn jump_to(&self, step: usize) -> Result<GameState, Error> {
        if step >= self.history.len() {
            return Err(Error::InvalidStep(step));
        }
        Ok(GameState {
            history: self.history.clone(),
            step_number: step,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
