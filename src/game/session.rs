use super::{GameEngine, GameState, LegalActions, Outcome};
use crate::error::{EngineError, MoveError};

/// A single game in progress: the engine, the current state, the outcome
/// cached from the last move, and the one state before it.
///
/// Only the immediately previous state is kept, so `undo` works once per
/// move played.
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    outcome: Outcome,
    previous: Option<GameState>,
    moves: Vec<usize>,
}

impl GameSession {
    pub fn new(engine: GameEngine) -> Self {
        let state = engine.start_state();
        GameSession {
            engine,
            state,
            outcome: Outcome::InProgress,
            previous: None,
            moves: Vec::new(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check if game is over
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Columns played so far, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Legal columns, or none once the game is over
    pub fn legal_actions(&self) -> LegalActions {
        if self.is_over() {
            return LegalActions::new();
        }
        self.engine.actions(&self.state)
    }

    /// Play a column for the player to move and return the new outcome
    pub fn play(&mut self, column: usize) -> Result<Outcome, EngineError> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }

        let transition = self.engine.step(&self.state, column)?;
        self.previous = Some(std::mem::replace(&mut self.state, transition.state));
        self.outcome = transition.outcome;
        self.moves.push(column);

        if self.is_over() {
            tracing::debug!(outcome = ?self.outcome, moves = self.moves.len(), "game finished");
        }
        Ok(self.outcome)
    }

    /// Step back to the previous state. Returns false when there is nothing
    /// to undo (no move yet, or the last move was already undone).
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.previous.take() else {
            return false;
        };
        self.state = previous;
        // A move was only accepted from an unfinished game
        self.outcome = Outcome::InProgress;
        self.moves.pop();
        true
    }

    /// Start over with an empty board
    pub fn reset(&mut self) {
        self.state = self.engine.start_state();
        self.outcome = Outcome::InProgress;
        self.previous = None;
        self.moves.clear();
    }
}
