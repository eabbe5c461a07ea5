use smallvec::SmallVec;

use super::board::DIRECTIONS;
use super::{Board, GameState, Outcome};
use crate::config::EngineConfig;
use crate::error::{EngineError, MoveError};

/// Legal columns in ascending order. Inline for boards up to 16 columns.
pub type LegalActions = SmallVec<[usize; 16]>;

/// Everything known right after a move: the new state, where the piece
/// landed, and the outcome found by checking only the lines through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub row: usize,
    pub column: usize,
    pub outcome: Outcome,
}

/// Rules for one board size, match length and starting player.
///
/// The engine holds no game data of its own; every operation takes a
/// [`GameState`] and returns a new one, so one engine can serve any number
/// of games or search branches at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    config: EngineConfig,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            match_length = config.match_length,
            first_player = config.first_player.name(),
            "game engine created"
        );
        Ok(GameEngine { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Empty board with the configured first player to move
    pub fn start_state(&self) -> GameState {
        GameState::new(
            Board::new(self.config.rows, self.config.cols),
            self.config.first_player,
        )
    }

    /// Get list of legal columns (not full), lowest index first
    pub fn actions(&self, state: &GameState) -> LegalActions {
        let board = state.board();
        (0..board.cols())
            .filter(|&col| !board.is_column_full(col))
            .collect()
    }

    /// Drop the mover's piece into `action` and hand the turn over.
    ///
    /// `state` is left untouched. Passing a terminal state is a caller
    /// error that is not detected here; use [`GameEngine::step`] or
    /// [`GameSession`](super::GameSession) when that matters.
    pub fn successor(&self, state: &GameState, action: usize) -> Result<GameState, EngineError> {
        self.place(state, action).map(|(next, _)| next)
    }

    /// [`GameEngine::successor`] plus the outcome of the resulting state,
    /// found by scanning only the four lines through the placed piece.
    ///
    /// Agrees with [`GameEngine::is_terminal`] whenever `state` itself was
    /// still in progress.
    pub fn step(&self, state: &GameState, action: usize) -> Result<Transition, EngineError> {
        let (next, row) = self.place(state, action)?;
        let outcome = self.outcome_at(next.board(), row, action);
        Ok(Transition {
            state: next,
            row,
            column: action,
            outcome,
        })
    }

    /// Full-board evaluation.
    ///
    /// Windows are scanned direction by direction (rows, columns, ↘, ↙),
    /// each in row-major order of the window's first cell; the first
    /// complete window decides the winner.
    pub fn is_terminal(&self, state: &GameState) -> Outcome {
        let board = state.board();
        let match_length = self.config.match_length;

        for direction in DIRECTIONS {
            for row in 0..board.rows() {
                for col in 0..board.cols() {
                    if let Some(owner) = board.run_owner(row, col, direction, match_length) {
                        return Outcome::Win(owner);
                    }
                }
            }
        }

        if board.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }

    /// Rebuild a state by playing `moves` from the start state. A move after
    /// the game has ended is rejected with [`MoveError::GameOver`].
    pub fn replay(&self, moves: &[usize]) -> Result<GameState, EngineError> {
        let mut state = self.start_state();
        let mut outcome = Outcome::InProgress;
        for &action in moves {
            if outcome.is_terminal() {
                return Err(MoveError::GameOver.into());
            }
            let transition = self.step(&state, action)?;
            state = transition.state;
            outcome = transition.outcome;
        }
        Ok(state)
    }

    fn place(&self, state: &GameState, action: usize) -> Result<(GameState, usize), EngineError> {
        let mover = state.player_to_move();

        // Copy-on-write: the caller's board is never touched
        let mut board = state.board().clone();
        let row = board.drop_piece(action, mover.to_cell())?;
        tracing::trace!(player = mover.name(), column = action, row, "piece placed");

        Ok((GameState::new(board, mover.other()), row))
    }

    fn outcome_at(&self, board: &Board, row: usize, col: usize) -> Outcome {
        if board.check_win(row, col, self.config.match_length) {
            if let Some(owner) = board.get(row, col).owner() {
                return Outcome::Win(owner);
            }
        }
        if board.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }
}
