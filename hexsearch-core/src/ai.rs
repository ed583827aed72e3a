//! Negamax alpha-beta search with a Zobrist-keyed transposition cache

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::board::{Board, Player};
use crate::config::SearchConfig;
use crate::eval::{evaluate, terminal_score};
use crate::ordering::order_moves;
use crate::zobrist::ZobristTable;

// ============================================================================
// CONSTANTS & TYPES
// ============================================================================

/// Window bound; negatable without overflow
pub const INFINITY: i32 = i32::MAX;

/// Exact-value cache keyed by (position hash, side to move, remaining depth).
/// Entries are reused regardless of the window they were searched with, so a
/// result cut off inside a narrow window can be returned as if it were exact.
///
/// Grows without eviction for as long as it is kept.
pub type TranspositionCache = FxHashMap<(u64, Player, u32), (i32, Option<usize>)>;

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Negamax calls
    pub nodes: u64,
    /// Depth-zero static evaluations
    pub leaf_evals: u64,
    pub cache_hits: u64,
    /// Beta cutoffs taken
    pub cutoffs: u64,
}

/// Result of a top-level search
#[derive(Clone, Debug, Serialize)]
pub struct SearchOutcome {
    pub best_move: Option<usize>,
    pub score: i32,
    pub stats: SearchStats,
}

// ============================================================================
// NEGAMAX WITH ALPHA-BETA
// ============================================================================

struct Searcher<'a> {
    zobrist: &'a ZobristTable,
    cache: &'a mut TranspositionCache,
    alpha_beta: bool,
    use_cache: bool,
    stats: SearchStats,
}

impl Searcher<'_> {
    fn negamax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        player: Player,
    ) -> (i32, Option<usize>) {
        self.stats.nodes += 1;

        // The previous mover may have just connected
        if board.check_winner(player.opponent()) {
            return (terminal_score(depth), None);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return (0, None);
        }

        if depth == 0 {
            self.stats.leaf_evals += 1;
            return (evaluate(board, player), None);
        }

        let key = (self.zobrist.hash(board), player, depth);
        if self.use_cache {
            if let Some(&entry) = self.cache.get(&key) {
                self.stats.cache_hits += 1;
                return entry;
            }
        }

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for cell in order_moves(board, &moves, player) {
            let score = match board.place(cell, player) {
                Ok(mut placed) => {
                    -self
                        .negamax(&mut placed, depth - 1, -beta, -alpha, player.opponent())
                        .0
                }
                Err(e) => {
                    tracing::warn!("Skipping unplayable move {}: {}", cell, e);
                    continue;
                }
            };

            if score > best_score {
                best_score = score;
                best_move = Some(cell);
            }

            alpha = alpha.max(score);
            if self.alpha_beta && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if self.use_cache {
            self.cache.insert(key, (best_score, best_move));
        }
        (best_score, best_move)
    }
}

/// `zobrist` if it covers every cell of `board`, otherwise a table of the
/// right size built from the same seed
fn table_for<'t>(zobrist: &'t ZobristTable, board: &Board) -> Cow<'t, ZobristTable> {
    if zobrist.cells() == board.num_cells() {
        Cow::Borrowed(zobrist)
    } else {
        tracing::warn!(
            "Zobrist table has {} cells but the board has {}; rebuilding",
            zobrist.cells(),
            board.num_cells()
        );
        Cow::Owned(ZobristTable::for_board(board, zobrist.seed()))
    }
}

/// Score `board` for `player` to move, searching `depth` plies.
///
/// Returns the score from `player`'s perspective and the best move found
/// (`None` at leaves and terminal positions). The board is restored before
/// returning.
pub fn negamax(
    board: &mut Board,
    depth: u32,
    alpha: i32,
    beta: i32,
    player: Player,
    zobrist: &ZobristTable,
    cache: &mut TranspositionCache,
) -> (i32, Option<usize>) {
    let zobrist = table_for(zobrist, board);
    let mut searcher = Searcher {
        zobrist: &zobrist,
        cache,
        alpha_beta: true,
        use_cache: true,
        stats: SearchStats::default(),
    };
    searcher.negamax(board, depth, alpha, beta, player)
}

/// Full-window search honouring every switch in `config`
pub fn search(
    board: &mut Board,
    player: Player,
    config: &SearchConfig,
    zobrist: &ZobristTable,
    cache: &mut TranspositionCache,
) -> SearchOutcome {
    let zobrist = table_for(zobrist, board);
    let mut searcher = Searcher {
        zobrist: &zobrist,
        cache,
        alpha_beta: config.alpha_beta,
        use_cache: config.use_cache,
        stats: SearchStats::default(),
    };
    let (score, best_move) =
        searcher.negamax(board, config.max_depth, -INFINITY, INFINITY, player);

    tracing::debug!(
        "Search player={} depth={} move={:?} score={} nodes={} leaves={} hits={} cutoffs={}",
        player,
        config.max_depth,
        best_move,
        score,
        searcher.stats.nodes,
        searcher.stats.leaf_evals,
        searcher.stats.cache_hits,
        searcher.stats.cutoffs
    );

    SearchOutcome {
        best_move,
        score,
        stats: searcher.stats,
    }
}

/// Best move for `player`, or `None` if the position is already decided or
/// the board is full. Uses a fresh cache unless one is supplied.
pub fn find_best_move(
    board: &mut Board,
    player: Player,
    max_depth: u32,
    zobrist: &ZobristTable,
    cache: Option<&mut TranspositionCache>,
) -> Option<usize> {
    let mut fresh = TranspositionCache::default();
    let cache = cache.unwrap_or(&mut fresh);
    let config = SearchConfig {
        max_depth,
        seed: zobrist.seed(),
        ..Default::default()
    };
    search(board, player, &config, zobrist, cache).best_move
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player keeping its cache across the moves of a game
pub struct AlphaBetaAI {
    pub config: SearchConfig,
    zobrist: ZobristTable,
    cache: TranspositionCache,
}

impl AlphaBetaAI {
    /// AI for `size` x `size` boards
    pub fn new(size: usize, config: SearchConfig) -> Self {
        Self {
            zobrist: ZobristTable::new(size * size, config.seed),
            config,
            cache: TranspositionCache::default(),
        }
    }

    /// Search the position and report move, score and counters
    pub fn search(&mut self, board: &mut Board, player: Player) -> SearchOutcome {
        if self.zobrist.cells() != board.num_cells() || self.zobrist.seed() != self.config.seed {
            tracing::debug!(
                "Rebuilding Zobrist table for {} cells (seed {})",
                board.num_cells(),
                self.config.seed
            );
            self.zobrist = ZobristTable::for_board(board, self.config.seed);
            self.cache.clear();
        }
        search(board, player, &self.config, &self.zobrist, &mut self.cache)
    }

    /// Get best move for current position
    pub fn best_move(&mut self, board: &mut Board, player: Player) -> Option<usize> {
        self.search(board, player).best_move
    }

    /// Self-play from `initial` until someone connects or the board fills
    pub fn play_game(&mut self, initial: Board, first: Player) -> (Board, Vec<usize>) {
        let mut board = initial;
        let mut history = Vec::new();
        let mut player = first;

        while !board.check_winner(player.opponent()) {
            let Some(cell) = self.best_move(&mut board, player) else {
                break;
            };
            if let Err(e) = board.apply(cell, player) {
                tracing::warn!("Engine produced unplayable move {}: {}", cell, e);
                break;
            }
            history.push(cell);
            player = player.opponent();
        }

        (board, history)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }
}

// ============================================================================
// TESTS
// ============================================================================
