//! Search configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::zobrist::DEFAULT_SEED;

/// Search parameters for the alpha-beta engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Remaining plies at the root
    pub max_depth: u32,
    /// Zobrist table seed
    pub seed: u64,
    /// Cut branches once alpha >= beta (false = full-width search)
    pub alpha_beta: bool,
    /// Consult and fill the transposition cache
    pub use_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            seed: DEFAULT_SEED,
            alpha_beta: true,
            use_cache: true,
        }
    }
}

impl SearchConfig {
    /// Create config searching `max_depth` plies
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Set Zobrist seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Disable alpha-beta cutoffs
    pub fn full_width(mut self) -> Self {
        self.alpha_beta = false;
        self
    }

    /// Disable the transposition cache
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
