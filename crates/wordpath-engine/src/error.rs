use thiserror::Error;

use crate::core::grid::GridPos;

/// Recoverable engine errors. None of these leave the grid or progress in a
/// partially-updated state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("word {word} not found in category {category}")]
    WordNotFound { word: String, category: String },

    #[error("position {0} is outside the grid or already solved")]
    OutOfBounds(GridPos),

    #[error("could not place word {word} in the grid")]
    PlacementFailed { word: String },

    #[error("grid of {rows}x{cols} exceeds the {max} cell side limit")]
    GridTooLarge { rows: usize, cols: usize, max: usize },

    #[error("grid row {row} has {found} letters, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while reading a dictionary document.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
