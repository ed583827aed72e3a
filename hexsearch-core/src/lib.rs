//! HEXSEARCH Core - Hex board model and alpha-beta search
//!
//! This crate provides the engine side of a Hex player:
//! - Board geometry (square grid, six-neighbour hex adjacency)
//! - Zobrist position hashing
//! - Shortest-connection evaluation
//! - Evaluation-based move ordering
//! - Negamax alpha-beta search with a transposition cache

pub mod board;
pub mod error;
pub mod zobrist;
pub mod eval;
pub mod ordering;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{Board, Placement, Player, DEFAULT_SIZE, DIRECTIONS};
pub use error::{HexError, Result};
pub use zobrist::{ZobristTable, DEFAULT_SEED};
pub use eval::{evaluate, shortest_connection_distance, EVAL_WIN_SCORE, LOSS_SCORE, WIN_SCORE};
pub use ordering::{order_moves, score_moves};
pub use ai::{
    find_best_move, negamax, search, AlphaBetaAI, SearchOutcome, SearchStats,
    TranspositionCache, INFINITY,
};
pub use config::SearchConfig;
