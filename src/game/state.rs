use serde::{Deserialize, Serialize};

use super::{Board, Cell, Player};
use crate::error::BoardError;

/// Result of evaluating a state. Always derived from the board, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Tie,
}

impl Outcome {
    /// True for `Win` and `Tie`
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Immutable snapshot of a game: the board plus whose turn it is.
///
/// Transitions go through [`GameEngine::successor`](super::GameEngine::successor),
/// which always builds a fresh value, so a state can be kept, shared between
/// threads, or replayed from freely.
///
/// Serializes as `{ rows, cols, cells, to_move }` with `cells` in row-major
/// order; deserializing re-checks the board shape and gravity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "StateRecord", try_from = "StateRecord")]
pub struct GameState {
    board: Board,
    to_move: Player,
}

impl GameState {
    pub fn new(board: Board, to_move: Player) -> Self {
        GameState { board, to_move }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose piece the next transition places
    pub fn player_to_move(&self) -> Player {
        self.to_move
    }
}

#[derive(Serialize, Deserialize)]
struct StateRecord {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    to_move: Player,
}

impl From<GameState> for StateRecord {
    fn from(state: GameState) -> Self {
        let GameState { board, to_move } = state;
        StateRecord {
            rows: board.rows(),
            cols: board.cols(),
            cells: board.cells().to_vec(),
            to_move,
        }
    }
}

impl TryFrom<StateRecord> for GameState {
    type Error = BoardError;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let board = Board::from_cells(record.rows, record.cols, record.cells)?;
        Ok(GameState::new(board, record.to_move))
    }
}
