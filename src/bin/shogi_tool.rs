//! Plum Shogi command-line tool.
//!
//! Renders positions, replays JSON game records and runs random playouts.
//!
//! Usage:
//! `cargo run --bin shogi_tool -- playout --seed 7 --plies 120`

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_shogi::game_state::game_state::{GameState, GameStatus};
use plum_shogi::game_state::rule_config::RuleConfig;
use plum_shogi::shogi_errors::ShogiResult;
use plum_shogi::utils::game_record::GameRecord;
use plum_shogi::utils::playout::random_playout;
use plum_shogi::utils::render_game_state::render_position;

/// Plum Shogi - rule engine tools
#[derive(Parser, Debug)]
#[command(name = "shogi_tool")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rule configuration file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a board and its status
    Render {
        /// Canonical position string (default: standard opening)
        #[arg(short, long)]
        position: Option<String>,
    },

    /// Replay a recorded game, re-validating every move
    Replay {
        /// Game record file (.json)
        #[arg(required = true)]
        record: PathBuf,
    },

    /// Play uniformly random legal moves from the opening
    Playout {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum plies (default: 200)
        #[arg(short = 'n', long, default_value = "200")]
        plies: usize,

        /// Save the game record to file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let result = load_rules(args.rules.as_deref()).and_then(|rules| match args.command {
        Commands::Render { position } => render(rules.unwrap_or_default(), position.as_deref()),
        Commands::Replay { record } => replay(&record, rules),
        Commands::Playout { seed, plies, save } => {
            playout(rules.unwrap_or_default(), seed, plies, save.as_deref())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_rules(path: Option<&Path>) -> ShogiResult<Option<RuleConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let rules = RuleConfig::from_json_file(path)?;
    info!(path = %path.display(), ?rules, "loaded rule configuration");
    Ok(Some(rules))
}

fn render(rules: RuleConfig, position: Option<&str>) -> ShogiResult<()> {
    let game = match position {
        Some(data) => GameState::from_position_string(data, rules)?,
        None => GameState::with_rules(rules),
    };
    print_game(&game, game.status()?);
    Ok(())
}

/// Records carry their own rules; `--rules` replaces them when given.
fn replay(path: &Path, rules: Option<RuleConfig>) -> ShogiResult<()> {
    let mut record = GameRecord::load(path)?;
    if let Some(rules) = rules {
        record.rules = rules;
    }
    let (game, status) = record.replay()?;
    print_game(&game, status);
    println!("moves: {}", game.move_log().len());
    Ok(())
}

fn playout(
    rules: RuleConfig,
    seed: Option<u64>,
    plies: usize,
    save: Option<&Path>,
) -> ShogiResult<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::with_rules(rules);
    let mut record = GameRecord::new(&game);

    let summary = random_playout(&mut game, &mut rng, plies)?;
    record.intents = summary.intents;

    print_game(&game, summary.status);
    println!("seed: {seed}");
    println!("plies: {}", summary.plies);

    if let Some(path) = save {
        record.save(path)?;
        info!(path = %path.display(), "saved game record");
    }
    Ok(())
}

fn print_game(game: &GameState, status: GameStatus) {
    println!("{}", render_position(game.position()));
    println!("status: {status}");
    println!("position: {}", game.to_position_string());
}
