//! Error types for the board model and configuration loading

/// Errors raised by board manipulation, parsing and config loading
#[derive(Debug, thiserror::Error)]
pub enum HexError {
    #[error("Illegal move: cell {cell} is already occupied")]
    IllegalMove { cell: usize },

    #[error("Cell {cell} is outside the board ({cells} cells)")]
    OutOfBounds { cell: usize, cells: usize },

    #[error("Invalid board size: {0}")]
    InvalidSize(usize),

    #[error("Board parse failed: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HexError>;
