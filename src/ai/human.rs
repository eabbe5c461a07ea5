use std::io::{self, BufRead, Write};

use super::agent::Agent;
use crate::game::{GameEngine, GameState};

/// Reads columns from a line-based input, re-prompting until a legal one is
/// entered. End of input or `q` gives up the move.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl HumanAgent<io::StdinLock<'static>, io::Stdout> {
    /// Agent bound to the process's stdin/stdout
    pub fn stdio() -> Self {
        HumanAgent::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanAgent { input, output }
    }

    fn prompt(&mut self, engine: &GameEngine, state: &GameState) -> io::Result<Option<usize>> {
        let legal = engine.actions(state);
        if legal.is_empty() {
            return Ok(None);
        }

        let player = state.player_to_move();
        loop {
            write!(
                self.output,
                "{} ({}), choose a column {:?}: ",
                player.name(),
                player.symbol(),
                legal.as_slice()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match line.parse::<usize>() {
                Ok(col) if legal.contains(&col) => return Ok(Some(col)),
                Ok(col) => writeln!(self.output, "Column {col} is not playable.")?,
                Err(_) => writeln!(self.output, "'{line}' is not a column number.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn select_action(&mut self, engine: &GameEngine, state: &GameState) -> Option<usize> {
        match self.prompt(engine, state) {
            Ok(choice) => choice,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read a move");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use std::io::Cursor;

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_reprompts_until_legal() {
        let engine = engine();
        let state = engine.replay(&[0, 0, 0, 0, 0, 0]).unwrap();
        let mut output = Vec::new();
        let mut agent = HumanAgent::new(Cursor::new("abc\n0\n 4 \n"), &mut output);

        assert_eq!(agent.select_action(&engine, &state), Some(4));
        drop(agent);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("'abc' is not a column number."), "{text}");
        assert!(text.contains("Column 0 is not playable."), "{text}");
        assert!(text.starts_with("Player 1 (X), choose a column [1, 2, 3, 4, 5, 6]: "));
    }

    #[test]
    fn test_quit_and_eof_give_up() {
        let engine = engine();
        let state = engine.start_state();

        let mut agent = HumanAgent::new(Cursor::new("q\n"), Vec::new());
        assert_eq!(agent.select_action(&engine, &state), None);

        let mut agent = HumanAgent::new(Cursor::new(""), Vec::new());
        assert_eq!(agent.select_action(&engine, &state), None);
    }
}
