use std::fmt;
use std::str::FromStr;

use crate::game::{GameEngine, GameState};

/// Anything that picks a column for the player to move.
pub trait Agent {
    /// Select an action (column) given the current game state.
    /// Returns `None` when the agent has nothing to play or gives up.
    fn select_action(&mut self, engine: &GameEngine, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Always plays the lowest legal column. Deterministic; handy in tests and
/// as a baseline opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalAgent;

impl Agent for FirstLegalAgent {
    fn select_action(&mut self, engine: &GameEngine, state: &GameState) -> Option<usize> {
        engine.actions(state).first().copied()
    }

    fn name(&self) -> &str {
        "First legal"
    }
}

/// Which agent the driver should seat for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Human,
    Random,
    First,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgentKind::Human => "human",
            AgentKind::Random => "random",
            AgentKind::First => "first",
        })
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(AgentKind::Human),
            "random" => Ok(AgentKind::Random),
            "first" => Ok(AgentKind::First),
            other => Err(format!(
                "unknown agent '{other}' (expected 'human', 'random' or 'first')"
            )),
        }
    }
}
