use crate::grid::{Grid, Position};
use crate::search::{Algorithm, SearchResult};
use pathfinding::prelude::astar;
use std::fmt;
use std::time::Duration;

/// Summary of one algorithm run, used by the comparison table and the batch
/// CSV output.
#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub algorithm: Algorithm,
    pub found: bool,
    pub steps_to_find: Option<usize>,
    pub expansions: usize,
    pub pending: usize,
    /// Moves along the reconstructed route.
    pub path_steps: usize,
    /// Fewest moves between start and target, independent of the strategy.
    pub optimal_path_length: Option<usize>,
    pub route_efficiency: f64,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn new(result: &SearchResult, optimal_path_length: Option<usize>, elapsed: Duration) -> Self {
        let mut stats = RunStatistics {
            algorithm: result.algorithm,
            found: result.found(),
            steps_to_find: result.steps_to_find,
            expansions: result.expansions,
            pending: result.pending.len(),
            path_steps: result.shortest_path.len().saturating_sub(1),
            optimal_path_length,
            route_efficiency: 0.0,
            elapsed,
        };
        stats.calculate_efficiency();
        stats
    }

    /// Route moves per optimal move: 1.0 is a shortest route, larger is longer.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.optimal_path_length {
            Some(optimal) if self.found && optimal > 0 => self.path_steps as f64 / optimal as f64,
            Some(0) if self.found => 1.0,
            _ => 0.0,
        };
    }

    pub fn is_optimal(&self) -> bool {
        self.found && self.optimal_path_length == Some(self.path_steps)
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        match self.steps_to_find {
            Some(steps) => writeln!(f, "Target found in {} steps", steps)?,
            None => writeln!(f, "Target not reached")?,
        }
        writeln!(f, "Cells expanded: {}", self.expansions)?;
        writeln!(f, "Cells pending: {}", self.pending)?;
        match self.optimal_path_length {
            Some(optimal) => writeln!(f, "Optimal path length: {}", optimal)?,
            None => writeln!(f, "Optimal path length: unreachable")?,
        }
        if self.found {
            writeln!(f, "Route efficiency: {:.3}", self.route_efficiency)?;
            if !self.is_optimal() {
                writeln!(
                    f,
                    "Note: route is {} moves longer than optimal",
                    self.path_steps
                        .saturating_sub(self.optimal_path_length.unwrap_or(0))
                )?;
            }
        }
        writeln!(f, "Search time: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// Fewest orthogonal moves from the grid's start to its target avoiding
/// walls, or `None` when no route exists. Reads only the wall layout, so it
/// can be called on a grid that has already been searched.
pub fn optimal_path_length(grid: &Grid) -> Option<usize> {
    let target = grid.target();
    if grid[grid.start()].is_wall {
        return None;
    }
    astar(
        &grid.start(),
        |p: &Position| {
            grid.neighbors(*p)
                .into_iter()
                .filter(|n| !grid[*n].is_wall)
                .map(|n| (n, 1usize))
                .collect::<Vec<_>>()
        },
        |p: &Position| p.manhattan(&target),
        |p: &Position| *p == target,
    )
    .map(|(_, cost)| cost)
}
