//! Best-move command - analyse a single position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_board(), analyse(), report()
//! - Level 4: formatting

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexsearch_core::{AlphaBetaAI, Board, Player, SearchConfig, SearchStats};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BestMoveArgs {
    /// Board file: rows of '.', 'O' (player 1) and 'X' (player -1)
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Side to move (1 or -1)
    #[arg(long, allow_hyphen_values = true)]
    pub player: i8,

    /// Search depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Analysis of one position
#[derive(Clone, Debug, Serialize)]
struct Analysis {
    player: i8,
    depth: u32,
    best_move: Option<usize>,
    row: Option<usize>,
    col: Option<usize>,
    score: i32,
    stats: SearchStats,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run best-move command
pub fn run(args: BestMoveArgs, seed: Option<u64>) -> Result<()> {
    let config = crate::resolve_config(args.config.as_deref(), args.depth, seed)?;
    let player = Player::from_sign(args.player)
        .with_context(|| format!("Invalid player {} (use 1 or -1)", args.player))?;
    let mut board = load_board(&args.board)?;

    tracing::info!(
        "Analysing {}x{} position for player {} at depth {}",
        board.size(),
        board.size(),
        player,
        config.max_depth
    );

    let analysis = analyse(&mut board, player, config);
    report(&analysis, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_board(path: &Path) -> Result<Board> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board: {}", path.display()))?;
    text.parse::<Board>()
        .with_context(|| format!("Failed to parse board: {}", path.display()))
}

fn analyse(board: &mut Board, player: Player, config: SearchConfig) -> Analysis {
    let depth = config.max_depth;
    let mut ai = AlphaBetaAI::new(board.size(), config);
    let outcome = ai.search(board, player);
    let coords = outcome.best_move.map(|cell| board.coords(cell));

    Analysis {
        player: player.sign(),
        depth,
        best_move: outcome.best_move,
        row: coords.map(|(r, _)| r),
        col: coords.map(|(_, c)| c),
        score: outcome.score,
        stats: outcome.stats,
    }
}

fn report(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    } else {
        println!("{}", format_text(analysis));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_text(analysis: &Analysis) -> String {
    match (analysis.best_move, analysis.row, analysis.col) {
        (Some(cell), Some(row), Some(col)) => format!(
            "Best move: {} (row {}, col {})  score={}  nodes={}",
            cell, row, col, analysis.score, analysis.stats.nodes
        ),
        _ => format!("No move available  score={}", analysis.score),
    }
}

// ============================================================================
// TESTS
// ============================================================================
