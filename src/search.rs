use crate::algorithms::{AStar, Budget, DepthFirst, Dijkstra, SearchStrategy};
use crate::error::{Result, SearchError};
use crate::grid::{Cell, Grid, Position};
use crate::path::reconstruct_path;
use log::debug;
use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed set of traversal strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Dijkstra,
    AStar,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Dfs];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Dfs => "dfs",
        }
    }

    pub fn strategy(&self) -> Box<dyn SearchStrategy> {
        match self {
            Algorithm::Dijkstra => Box::new(Dijkstra::new()),
            Algorithm::AStar => Box::new(AStar::new()),
            Algorithm::Dfs => Box::new(DepthFirst::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a_star" | "a*" => Ok(Algorithm::AStar),
            "dfs" => Ok(Algorithm::Dfs),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Everything needed to run one search on a freshly built grid.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub rows: usize,
    pub columns: usize,
    pub start: Position,
    pub target: Position,
    pub walls: FxHashSet<Position>,
    pub algorithm: Algorithm,
    pub budget: Budget,
}

impl SearchRequest {
    /// An open grid searched with Dijkstra and no budget.
    pub fn new(rows: usize, columns: usize, start: Position, target: Position) -> Self {
        SearchRequest {
            rows,
            columns,
            start,
            target,
            walls: FxHashSet::default(),
            algorithm: Algorithm::Dijkstra,
            budget: Budget::Unbounded,
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls = walls.into_iter().collect();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Selects the algorithm by name; unknown names are rejected.
    pub fn with_algorithm_name(self, name: &str) -> Result<Self> {
        Ok(self.with_algorithm(name.parse()?))
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }
}

/// Combined output of a search, as consumed by renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub visited_in_order: Vec<Cell>,
    pub pending: Vec<Cell>,
    /// Moves from start to target along the discovered route. `Some(0)` when
    /// start and target coincide, `None` when the target was not reached.
    #[serde(serialize_with = "serialize_steps")]
    pub steps_to_find: Option<usize>,
    /// Cells dequeued and expanded, the target included when it was reached.
    pub expansions: usize,
    pub shortest_path: Vec<Cell>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.steps_to_find.is_some()
    }

    /// Step count with `-1` standing in for "not found".
    pub fn steps_or_sentinel(&self) -> i64 {
        self.steps_to_find.map_or(-1, |s| s as i64)
    }
}

fn serialize_steps<S: Serializer>(
    steps: &Option<usize>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i64(steps.map_or(-1, |s| s as i64))
}

/// Builds a fresh grid for `request`, searches it and returns the result.
pub fn run(request: &SearchRequest) -> Result<SearchResult> {
    run_with_grid(request).map(|(_, result)| result)
}

/// Like [`run`], but also hands back the grid in its final state.
pub fn run_with_grid(request: &SearchRequest) -> Result<(Grid, SearchResult)> {
    if request.budget == Budget::Limited(0) {
        return Err(SearchError::InvalidBudget);
    }
    let mut grid = Grid::build(
        request.rows,
        request.columns,
        request.start,
        request.target,
        &request.walls,
    )?;
    let result = search(&mut grid, request.algorithm, request.budget);
    Ok((grid, result))
}

/// Searches `grid` from its start to its target with `algorithm`, then
/// reconstructs the route and flags its cells in the grid.
///
/// The grid must not have been searched before.
pub fn search(grid: &mut Grid, algorithm: Algorithm, budget: Budget) -> SearchResult {
    let (start, target) = (grid.start(), grid.target());
    let mut strategy = algorithm.strategy();
    let outcome = strategy.search(grid, start, target, budget);

    let mut shortest_path = reconstruct_path(grid, target);
    for cell in shortest_path.iter_mut() {
        cell.is_on_shortest_path = true;
        grid[cell.id].is_on_shortest_path = true;
    }

    debug!(
        "{}: {} -> {} on {}x{}: steps {:?}, {} expanded, {} pending, path of {} cells",
        algorithm,
        start,
        target,
        grid.rows(),
        grid.columns(),
        outcome.steps_to_find,
        outcome.visited_in_order.len(),
        outcome.pending.len(),
        shortest_path.len()
    );

    SearchResult {
        algorithm,
        expansions: outcome.visited_in_order.len(),
        visited_in_order: outcome.visited_in_order,
        pending: outcome.pending,
        steps_to_find: outcome.steps_to_find,
        shortest_path,
    }
}
