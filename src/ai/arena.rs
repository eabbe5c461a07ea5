use std::fmt;

use super::agent::Agent;
use crate::error::MatchError;
use crate::game::{GameEngine, GameSession, GameState, Outcome, Player};

/// How a finished game went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub moves: Vec<usize>,
    pub outcome: Outcome,
    pub final_state: GameState,
}

/// Play one game to the end, asking each agent for moves in turn.
///
/// `observer` sees every state after a move together with the column that
/// produced it. An agent declining to move ends the game with
/// [`MatchError::NoMove`]; an illegal column ends it with the engine error.
pub fn play_game(
    engine: &GameEngine,
    player1: &mut dyn Agent,
    player2: &mut dyn Agent,
    mut observer: impl FnMut(&GameState, usize),
) -> Result<GameRecord, MatchError> {
    let mut session = GameSession::new(engine.clone());

    while !session.is_over() {
        let player = session.state().player_to_move();
        let agent: &mut dyn Agent = match player {
            Player::One => &mut *player1,
            Player::Two => &mut *player2,
        };

        let column = agent
            .select_action(engine, session.state())
            .ok_or(MatchError::NoMove { player })?;
        session.play(column)?;
        observer(session.state(), column);
    }

    Ok(GameRecord {
        moves: session.moves().to_vec(),
        outcome: session.outcome(),
        final_state: session.state().clone(),
    })
}

/// Running win/tie counts over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub player1_wins: u64,
    pub player2_wins: u64,
    pub ties: u64,
    pub total_moves: u64,
}

impl Tally {
    pub fn record(&mut self, game: &GameRecord) {
        match game.outcome {
            Outcome::Win(Player::One) => self.player1_wins += 1,
            Outcome::Win(Player::Two) => self.player2_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::InProgress => return,
        }
        self.total_moves += game.moves.len() as u64;
    }

    pub fn games(&self) -> u64 {
        self.player1_wins + self.player2_wins + self.ties
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: Player 1 won {}, Player 2 won {}, {} tied",
            self.games(),
            self.player1_wins,
            self.player2_wins,
            self.ties
        )
    }
}
