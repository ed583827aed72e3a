//! Play command - run a game between engine and/or human players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game()
//! - Level 3: choose_move(), read_human_move()
//! - Level 4: argument helpers

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexsearch_core::{AlphaBetaAI, Board, Player, SearchConfig, DEFAULT_SIZE};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board edge length
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Search depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Engine-controlled players, comma separated (1 and/or -1)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "1")]
    pub ai: Vec<i8>,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Outcome of one game
#[derive(Clone, Debug)]
pub struct GameSummary {
    pub winner: Option<Player>,
    pub moves: Vec<usize>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = crate::resolve_config(args.config.as_deref(), args.depth, seed)?;
    let ai_players = parse_players(&args.ai)?;

    tracing::info!(
        "Starting game: {}x{} board, depth={}, engine plays {:?}",
        args.size,
        args.size,
        config.max_depth,
        ai_players
    );

    let stdin = io::stdin();
    let summary = play_game(
        args.size,
        config,
        &ai_players,
        &mut stdin.lock(),
        &mut io::stdout(),
    )?;

    tracing::info!(
        "Game over after {} moves, winner: {:?}",
        summary.moves.len(),
        summary.winner
    );

    Ok(())
}

// ============================================================================
// LEVEL 2 - GAME LOOP
// ============================================================================

/// Play until the mover connects or the board fills
pub fn play_game<R: BufRead, W: Write>(
    size: usize,
    config: SearchConfig,
    ai_players: &[Player],
    input: &mut R,
    output: &mut W,
) -> Result<GameSummary> {
    let mut board = Board::new(size)?;
    let mut ai = AlphaBetaAI::new(size, config);
    let mut player = Player::One;
    let mut moves = Vec::new();

    writeln!(output, "=== Game Start ({0}x{0} Hex) ===", size)?;
    writeln!(output, "{}", board)?;

    loop {
        let cell = choose_move(&mut board, player, ai_players, &mut ai, input, output)?;
        board.apply(cell, player)?;
        moves.push(cell);
        tracing::debug!("Player {} played {}", player, cell);

        writeln!(output, "{}", board)?;

        if board.check_winner(player) {
            let who = if ai_players.contains(&player) { "AI" } else { "You" };
            writeln!(output, "{} (Player {}) wins!", who, player)?;
            return Ok(GameSummary {
                winner: Some(player),
                moves,
            });
        }

        if board.legal_moves().is_empty() {
            tracing::warn!("Board filled without a connection");
            writeln!(output, "All cells are filled without a winner.")?;
            return Ok(GameSummary {
                winner: None,
                moves,
            });
        }

        player = player.opponent();
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn choose_move<R: BufRead, W: Write>(
    board: &mut Board,
    player: Player,
    ai_players: &[Player],
    ai: &mut AlphaBetaAI,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    if ai_players.contains(&player) {
        writeln!(output, "AI (Player {}) thinking ...", player)?;
        let cell = ai
            .best_move(board, player)
            .context("Engine found no legal move")?;
        writeln!(output, "AI chooses action: {}", cell)?;
        Ok(cell)
    } else {
        read_human_move(board, player, input, output)
    }
}

/// Prompt until a legal cell index is entered
fn read_human_move<R: BufRead, W: Write>(
    board: &Board,
    player: Player,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    writeln!(output, "Your turn (Player {}).", player)?;
    writeln!(output, "Valid actions: {:?}", board.legal_moves())?;

    loop {
        write!(output, "Enter your move: ")?;
        output.flush()?;

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => anyhow::bail!("Input closed before a move was entered"),
            Ok(_) => {}
            // Undecodable bytes are consumed; treat them as a bad entry
            Err(e) if e.kind() == io::ErrorKind::InvalidData => line.clear(),
            Err(e) => return Err(e.into()),
        }

        match line.trim().parse::<usize>() {
            Ok(cell) if board.is_legal(cell) => return Ok(cell),
            _ => writeln!(output, "Invalid move. Try again.")?,
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_players(signs: &[i8]) -> Result<Vec<Player>> {
    signs
        .iter()
        .map(|&s| Player::from_sign(s).with_context(|| format!("Invalid player {} (use 1 or -1)", s)))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
