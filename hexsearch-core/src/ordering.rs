//! Move ordering by one-ply static evaluation
//!
//! Searching the most promising placements first lets alpha-beta cut more
//! branches. Ordering never changes the search result, only its cost.

use crate::board::{Board, Player};
use crate::eval::evaluate;

/// Score each move by placing it, evaluating for `player`, then undoing it.
///
/// Pairs come back in input order. Cells that cannot be played are skipped.
pub fn score_moves(board: &mut Board, moves: &[usize], player: Player) -> Vec<(usize, i32)> {
    moves
        .iter()
        .filter_map(|&cell| match board.place(cell, player) {
            Ok(placed) => Some((cell, evaluate(&placed, player))),
            Err(e) => {
                tracing::warn!("Skipping unplayable move {}: {}", cell, e);
                None
            }
        })
        .collect()
}

/// Moves sorted best-first for `player` (stable among equal scores)
pub fn order_moves(board: &mut Board, moves: &[usize], player: Player) -> Vec<usize> {
    let mut scored = score_moves(board, moves, player);
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(cell, _)| cell).collect()
}
