use crate::algorithms::Budget;
use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::grid::{Grid, Position};
use crate::search::{Algorithm, SearchRequest};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// A grid layout shared by every algorithm run on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub rows: usize,
    pub columns: usize,
    pub start: Position,
    pub target: Position,
    pub walls: FxHashSet<Position>,
    /// Seed the random parts were drawn from, for reproducing the layout.
    pub seed: u64,
}

impl Environment {
    /// Lays out an environment from `config`.
    ///
    /// Start and target default to random cells in the top-left and
    /// bottom-right quadrants. `num_walls` random walls are added to the
    /// explicit ones, never on the start or the target.
    pub fn generate(config: &Config, seed: Option<u64>) -> Result<Self> {
        let (rows, columns) = (config.rows, config.columns);
        if rows == 0 || columns == 0 {
            return Err(SearchError::InvalidDimensions { rows, columns });
        }
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);

        let start = config.start.unwrap_or_else(|| Position {
            row: rng.gen_range(0..(rows / 2).max(1)),
            column: rng.gen_range(0..(columns / 2).max(1)),
        });
        let target = config.target.unwrap_or_else(|| Position {
            row: rng.gen_range(rows / 2..rows),
            column: rng.gen_range(columns / 2..columns),
        });

        let mut walls: FxHashSet<Position> = config.walls.iter().copied().collect();
        let mut placed = 0;
        let mut attempts = 0;
        let max_attempts = config.num_walls * 10;
        while placed < config.num_walls && attempts < max_attempts {
            let pos = Position {
                row: rng.gen_range(0..rows),
                column: rng.gen_range(0..columns),
            };
            if pos != start && pos != target && walls.insert(pos) {
                placed += 1;
            }
            attempts += 1;
        }
        if placed < config.num_walls {
            warn!(
                "placed only {} of {} random walls after {} attempts",
                placed, config.num_walls, attempts
            );
        }

        debug!(
            "generated environment - seed: {}, start: {}, target: {}, walls: {}",
            seed,
            start,
            target,
            walls.len()
        );

        Ok(Environment {
            rows,
            columns,
            start,
            target,
            walls,
            seed,
        })
    }

    pub fn request(&self, algorithm: Algorithm, budget: Budget) -> SearchRequest {
        SearchRequest {
            rows: self.rows,
            columns: self.columns,
            start: self.start,
            target: self.target,
            walls: self.walls.clone(),
            algorithm,
            budget,
        }
    }

    pub fn build_grid(&self) -> Result<Grid> {
        Grid::build(self.rows, self.columns, self.start, self.target, &self.walls)
    }
}
