//! Position evaluation by shortest connection distance

use std::collections::VecDeque;

use crate::board::{Board, Player};

/// Terminal score magnitude; search results add the remaining depth to it
pub const WIN_SCORE: i32 = 999_999;

/// Heuristic score when only the evaluated player has a connection
pub const EVAL_WIN_SCORE: i32 = 9999;

/// Heuristic score when only the opponent has a connection
pub const LOSS_SCORE: i32 = -EVAL_WIN_SCORE;

/// Length of the shortest owned chain from `player`'s start edge to their
/// goal edge, counted in edges. `None` if the player has no such chain.
///
/// Only cells already owned by `player` are traversed; empty cells are walls.
pub fn shortest_connection_distance(board: &Board, player: Player) -> Option<u32> {
    let mut visited = vec![false; board.num_cells()];
    let mut queue = VecDeque::new();

    for start in board.owned_start_cells(player) {
        visited[start] = true;
        queue.push_back((start, 0u32));
    }

    while let Some((current, dist)) = queue.pop_front() {
        if board.is_goal_edge(current, player) {
            return Some(dist);
        }
        for next in board.neighbors(current) {
            if !visited[next] && board.get(next) == Some(player) {
                visited[next] = true;
                queue.push_back((next, dist + 1));
            }
        }
    }

    None
}

/// Combine both players' distances into a score for the first player
pub fn distance_score(own: Option<u32>, opponent: Option<u32>) -> i32 {
    match (own, opponent) {
        (None, None) => 0,
        (None, Some(_)) => LOSS_SCORE,
        (Some(_), None) => EVAL_WIN_SCORE,
        (Some(own), Some(opp)) => opp as i32 - own as i32,
    }
}

/// Evaluate position from `player`'s perspective (higher is better)
pub fn evaluate(board: &Board, player: Player) -> i32 {
    distance_score(
        shortest_connection_distance(board, player),
        shortest_connection_distance(board, player.opponent()),
    )
}

/// Score of a position whose previous mover has already connected,
/// from the side to move. Higher remaining depth means the loss came sooner.
pub fn terminal_score(depth: u32) -> i32 {
    -WIN_SCORE + depth as i32
}
