//! Core game logic: board representation, player types, the rules engine
//! with immutable transitions, and a single-game session wrapper.

mod board;
mod engine;
mod player;
mod session;
mod state;

pub use board::{Board, Cell, DIRECTIONS};
pub use engine::{GameEngine, LegalActions, Transition};
pub use player::Player;
pub use session::GameSession;
pub use state::{GameState, Outcome};
