use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use connect_n::ai::{
    play_game, Agent, AgentKind, FirstLegalAgent, HumanAgent, RandomAgent, Tally,
};
use connect_n::config::AppConfig;
use connect_n::error::MatchError;
use connect_n::game::{Board, GameEngine, Outcome};

/// Play a gravity connection game in the terminal.
#[derive(Parser)]
#[command(name = "connect-n", about = "Play Connect Four and its variants")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-n.toml")]
    config: PathBuf,

    /// Override board height
    #[arg(long)]
    rows: Option<usize>,

    /// Override board width
    #[arg(long)]
    cols: Option<usize>,

    /// Override the number of pieces in a row needed to win
    #[arg(long)]
    match_length: Option<usize>,

    /// Agent for player 1: human, random or first
    #[arg(long)]
    player1: Option<AgentKind>,

    /// Agent for player 2: human, random or first
    #[arg(long)]
    player2: Option<AgentKind>,

    /// Number of games to play
    #[arg(long)]
    games: Option<usize>,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final tally (boards are still shown to human players)
    #[arg(long)]
    quiet: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "connect_n=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        app_config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        app_config.board.cols = cols;
    }
    if let Some(match_length) = cli.match_length {
        app_config.board.match_length = match_length;
    }
    if let Some(kind) = cli.player1 {
        app_config.play.player1 = kind;
    }
    if let Some(kind) = cli.player2 {
        app_config.play.player2 = kind;
    }
    if let Some(games) = cli.games {
        app_config.play.games = games;
    }
    if cli.seed.is_some() {
        app_config.play.seed = cli.seed;
    }
    app_config
        .validate()
        .context("invalid configuration after command-line overrides")?;

    let engine = GameEngine::new(app_config.board.clone())?;
    let play = &app_config.play;
    let has_human = play.player1 == AgentKind::Human || play.player2 == AgentKind::Human;
    let show_boards = !cli.quiet || has_human;

    let mut player1 = build_agent(play.player1, play.seed);
    let mut player2 = build_agent(play.player2, play.seed.map(|s| s.wrapping_add(1)));
    tracing::info!(
        rows = engine.config().rows,
        cols = engine.config().cols,
        match_length = engine.config().match_length,
        player1 = player1.name(),
        player2 = player2.name(),
        games = play.games,
        "starting"
    );

    let mut tally = Tally::default();
    let start = Instant::now();

    for game in 1..=play.games {
        if show_boards {
            println!("Game {game}");
            render(engine.start_state().board());
        }

        let result = play_game(&engine, player1.as_mut(), player2.as_mut(), |state, col| {
            if show_boards {
                let mover = state.player_to_move().other();
                println!("{} played column {col}", mover.name());
                render(state.board());
            }
        });

        let record = match result {
            Ok(record) => record,
            Err(MatchError::NoMove { player }) => {
                println!("{} left the game.", player.name());
                break;
            }
            Err(err) => return Err(err.into()),
        };

        if show_boards {
            match record.outcome {
                Outcome::Win(player) => println!("{} wins!", player.name()),
                Outcome::Tie => println!("Tie game"),
                Outcome::InProgress => {}
            }
        }
        tally.record(&record);
    }

    let elapsed = start.elapsed();
    println!("{tally}");
    if tally.games() > 0 && tally.total_moves > 0 {
        let per_game = elapsed.as_secs_f64() * 1000.0 / tally.games() as f64;
        let per_move = elapsed.as_secs_f64() * 1000.0 / tally.total_moves as f64;
        println!(
            "Took {:.3} s ({per_game:.3} ms per game, ~{per_move:.4} ms per move)",
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}

fn build_agent(kind: AgentKind, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        AgentKind::Human => Box::new(HumanAgent::stdio()),
        AgentKind::Random => Box::new(seed.map_or_else(RandomAgent::new, RandomAgent::seeded)),
        AgentKind::First => Box::new(FirstLegalAgent),
    }
}

/// Print the board with a column index row underneath
fn render(board: &Board) {
    print!("{board}");
    let footer: String = (0..board.cols())
        .map(|col| char::from_digit((col % 10) as u32, 10).unwrap_or('?'))
        .collect();
    println!("{footer}\n");
}
