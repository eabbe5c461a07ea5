//! Move-selection agents and the loop that pits two of them against each
//! other. None of them search; they only consume the engine's public API.

mod agent;
pub mod arena;
mod human;
mod random;

pub use agent::{Agent, AgentKind, FirstLegalAgent};
pub use arena::{play_game, GameRecord, Tally};
pub use human::HumanAgent;
pub use random::RandomAgent;
