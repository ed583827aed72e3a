//! Zobrist hashing for transposition lookups
//!
//! Each (cell, player) pair gets an independent random 64-bit value drawn
//! from a seeded ChaCha8 stream. A position hash is the XOR of the values of
//! every occupied cell, so it depends only on the stones present and not on
//! the order they were played in.
//!
//! Collisions are possible in principle and are not detected.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Player};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 2023;

/// Immutable table of per-(cell, player) random keys
#[derive(Clone, Debug)]
pub struct ZobristTable {
    seed: u64,
    keys: Vec<[u64; 2]>,
}

impl ZobristTable {
    /// Generate keys for a board with `cells` cells
    pub fn new(cells: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let keys = (0..cells).map(|_| [rng.gen::<u64>(), rng.gen::<u64>()]).collect();
        Self { seed, keys }
    }

    /// Table sized for `board`
    pub fn for_board(board: &Board, seed: u64) -> Self {
        Self::new(board.num_cells(), seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cells(&self) -> usize {
        self.keys.len()
    }

    /// Key for a single stone; XOR it in or out for incremental updates
    ///
    /// # Panics
    ///
    /// If `cell` is not below [`cells`](Self::cells).
    #[inline]
    pub fn value(&self, cell: usize, player: Player) -> u64 {
        self.keys[cell][player.index()]
    }

    /// Full hash of the board
    pub fn hash(&self, board: &Board) -> u64 {
        debug_assert_eq!(board.num_cells(), self.keys.len(), "table/board size mismatch");
        board
            .cells()
            .iter()
            .enumerate()
            .filter_map(|(cell, occupant)| occupant.map(|p| self.value(cell, p)))
            .fold(0, |h, key| h ^ key)
    }
}
