//! HEXSEARCH CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game (engine vs engine, or engine vs human on stdin)
//! - best-move: Analyse one position read from a board file

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexsearch_core::SearchConfig;

mod best_move_cmd;
mod play_cmd;

#[derive(Parser)]
#[command(name = "hexsearch")]
#[command(about = "Hex player using negamax alpha-beta search")]
struct Cli {
    /// Zobrist seed (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Find the best move for a position
    BestMove(best_move_cmd::BestMoveArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::BestMove(args) => best_move_cmd::run(args, cli.seed),
    }
}

/// Build the search config: file (or defaults), then command-line overrides
pub(crate) fn resolve_config(
    path: Option<&Path>,
    depth: Option<u32>,
    seed: Option<u64>,
) -> Result<SearchConfig> {
    let mut config = match path {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(depth) = depth {
        config.max_depth = depth;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    Ok(config)
}
