//! Grid search traversal engine.
//!
//! Builds a rectangular grid with a start, a target and walls, runs one of
//! Dijkstra, A* (greedy, heuristic-only) or depth-first search over it, and
//! reports the visitation order, the leftover frontier, the step count and
//! the reconstructed route.

pub mod algorithms;
pub mod batch;
pub mod comparison;
pub mod config;
pub mod environment;
pub mod error;
pub mod grid;
pub mod path;
pub mod render;
pub mod search;
pub mod statistics;

pub use algorithms::{Budget, SearchOutcome, SearchStrategy};
pub use error::{Result, SearchError};
pub use grid::{Cell, Grid, Position};
pub use path::reconstruct_path;
pub use search::{run, run_with_grid, search, Algorithm, SearchRequest, SearchResult};
