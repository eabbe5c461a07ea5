use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::{GameEngine, GameState};

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and benchmark runs
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, engine: &GameEngine, state: &GameState) -> Option<usize> {
        let actions = engine.actions(state);
        if actions.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..actions.len());
        Some(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_random_agent_selects_legal_action() {
        let engine = engine();
        let mut agent = RandomAgent::new();
        let state = engine.replay(&[0, 0, 0, 0, 0, 0]).unwrap();
        let legal = engine.actions(&state);

        for _ in 0..100 {
            let action = agent.select_action(&engine, &state).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_seeded_agents_agree() {
        let engine = engine();
        let state = engine.start_state();
        let mut a = RandomAgent::seeded(42);
        let mut b = RandomAgent::seeded(42);
        for _ in 0..20 {
            assert_eq!(
                a.select_action(&engine, &state),
                b.select_action(&engine, &state)
            );
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let engine = engine();
        let mut agent1 = RandomAgent::seeded(1);
        let mut agent2 = RandomAgent::seeded(2);
        let mut state = engine.start_state();
        let mut outcome = engine.is_terminal(&state);

        let mut turn = 0;
        while !outcome.is_terminal() {
            let action = if turn % 2 == 0 {
                agent1.select_action(&engine, &state)
            } else {
                agent2.select_action(&engine, &state)
            }
            .unwrap();
            state = engine.successor(&state, action).unwrap();
            outcome = engine.is_terminal(&state);
            turn += 1;
        }

        assert!(turn <= 42);
        assert!(outcome.is_terminal());
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
