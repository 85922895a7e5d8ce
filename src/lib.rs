use std::num::ParseIntError;

use sodium::{Cell, CellLoop, SodiumCtx, Stream};
use thiserror::Error;

mod board;
mod game;

pub use board::{win_lines, Board, Mark, DIMENSION};
pub use game::{GameState, HistoryEntry, Status};

#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("invalid move: square {0} is already taken!")]
    InvalidMove(usize),

    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("invalid step: {0} is not a recorded position!")]
    InvalidStep(usize),

    #[error("the game is already over!")]
    GameOver,
}

/// One user intent, parsed from a line of input: mark a square, or travel
/// to a recorded step of the history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Intent {
    Mark(usize),
    Jump(usize),
}

#[derive(Clone, Debug)]
enum Transition {
    Moved {
        index: usize,
        mark: Mark,
        game: GameState,
    },
    Jumped {
        step: usize,
        game: GameState,
    },
}

impl Transition {
    fn game(&self) -> &GameState {
        match self {
            Transition::Moved { game, .. } | Transition::Jumped { game, .. } => game,
        }
    }
}

impl Intent {
    fn apply(&self, game: &GameState) -> Result<Transition, Error> {
        match *self {
            Intent::Mark(index) => {
                let mark = game.next_mark();
                let game = game.apply_move(index)?;
                Ok(Transition::Moved { index, mark, game })
            }
            Intent::Jump(step) => {
                let game = game.jump_to(step)?;
                Ok(Transition::Jumped { step, game })
            }
        }
    }
}

pub struct TicTacToe {
    pub game: Cell<GameState>,
    pub board: Cell<Board>,
    pub turn: Cell<Mark>,
    pub moves: Stream<(usize, Mark)>,
    pub jumps: Stream<usize>,
    pub status: Stream<Status>,
    pub winner: Stream<Mark>,
    pub error: Stream<Error>,
}

struct InputParser {
    intent_stream: Stream<Intent>,
    error_stream: Stream<Error>,
}

impl TicTacToe {
    pub fn new(ctx: &SodiumCtx, kb_input: &Stream<String>) -> TicTacToe {
        let game_cell_loop: CellLoop<GameState> = ctx.new_cell_loop();
        let game_cell_fwd = game_cell_loop.cell();

        let InputParser {
            intent_stream,
            error_stream,
        } = InputParser::new(kb_input);

        // The game cell holds the state at the start of the transaction, so
        // every intent is applied to the pre-intent snapshot.
        let (transition_stream, rejected_stream) = intent_stream
            .snapshot(&game_cell_fwd, |intent: &Intent, game: &GameState| {
                intent.apply(game)
            })
            .split_res();

        let game_stream =
            transition_stream.map(|transition: &Transition| transition.game().clone());
        let game_cell = game_stream.hold(GameState::new());
        game_cell_loop.loop_(&game_cell);

        let moves = transition_stream
            .map(|transition: &Transition| match transition {
                Transition::Moved { index, mark, .. } => Some((*index, *mark)),
                Transition::Jumped { .. } => None,
            })
            .filter_option();
        let jumps = transition_stream
            .map(|transition: &Transition| match transition {
                Transition::Jumped { step, .. } => Some(*step),
                Transition::Moved { .. } => None,
            })
            .filter_option();

        let status = game_stream.map(|game: &GameState| game.status());
        let winner = status
            .map(|status: &Status| match status {
                Status::Winner(mark) => Some(*mark),
                _ => None,
            })
            .filter_option();

        let board_cell = game_cell.map(|game: &GameState| game.current_board().clone());
        let turn_cell = game_cell.map(|game: &GameState| game.next_mark());

        TicTacToe {
            game: game_cell,
            board: board_cell,
            turn: turn_cell,
            moves,
            jumps,
            status,
            winner,
            error: error_stream.or_else(&rejected_stream),
        }
    }
}

impl InputParser {
    fn new(input_stream: &Stream<String>) -> InputParser {
        let (intent_stream, error_stream) = input_stream
            .filter(|line: &String| !line.trim().is_empty())
            .map(|line: &String| parse_line(line))
            .split_res();

        InputParser {
            intent_stream,
            error_stream,
        }
    }
}

/// Grammar of the keyboard protocol: a bare number marks that square
/// (1-based, numpad order), `jump <step>` travels through the history.
fn parse_line(line: &str) -> Result<Intent, Error> {
    let line = line.trim();
    if let Some(step) = line.strip_prefix("jump") {
        let step = step.trim().parse::<usize>().map_err(Error::InvalidInteger)?;
        return Ok(Intent::Jump(step));
    }
    match line.parse::<usize>().map_err(Error::InvalidInteger)? {
        0 => Err(Error::InvalidIndex(0)),
        square => Ok(Intent::Mark(square - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numbers_parse_as_marks() {
        assert!(matches!(parse_line("1"), Ok(Intent::Mark(0))));
        assert!(matches!(parse_line(" 9 "), Ok(Intent::Mark(8))));
    }

    #[test]
    fn jump_commands_parse_as_jumps() {
        assert!(matches!(parse_line("jump 0"), Ok(Intent::Jump(0))));
        assert!(matches!(parse_line("jump 3"), Ok(Intent::Jump(3))));
    }

    #[test]
    fn square_zero_is_out_of_range() {
        assert!(matches!(parse_line("0"), Err(Error::InvalidIndex(0))));
    }

    #[test]
    fn garbage_is_an_invalid_integer() {
        assert!(matches!(parse_line("zap"), Err(Error::InvalidInteger(_))));
        assert!(matches!(parse_line("jump x"), Err(Error::InvalidInteger(_))));
        assert!(matches!(parse_line("jump"), Err(Error::InvalidInteger(_))));
    }
}
