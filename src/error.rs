//! Error types for gridsearch

use crate::grid::Position;
use thiserror::Error;

/// Errors raised while building or searching a grid.
///
/// An unreachable target is not an error; it is reported through
/// `SearchResult::steps_to_find`.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("grid dimensions must be at least 1x1, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("{role} {position} is outside the {rows}x{columns} grid")]
    OutOfBounds {
        role: &'static str,
        position: Position,
        rows: usize,
        columns: usize,
    },

    #[error("unknown algorithm '{0}' (expected dijkstra, astar or dfs)")]
    UnknownAlgorithm(String),

    #[error("visitation budget must be at least 1")]
    InvalidBudget,

    #[error("invalid cell position '{0}'")]
    InvalidPosition(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
