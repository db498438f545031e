use crate::algorithms::common::{
    traverse, Budget, MinHeapFrontier, Relaxation, SearchOutcome, SearchStrategy,
};
use crate::grid::{Grid, Position};

/// Heuristic-ordered search over orthogonal unit steps.
///
/// Cells are ranked purely by their straight-line distance to the target,
/// looked up in a table computed once per run. Accumulated path cost is never
/// added, which makes this greedy best-first search: it tends to expand far
/// fewer cells than Dijkstra but the route it finds is not guaranteed to be
/// shortest.
#[derive(Debug, Default)]
pub struct AStar {
    heuristics: Vec<f64>,
    columns: usize,
}

impl AStar {
    pub fn new() -> Self {
        AStar::default()
    }

    fn build_heuristics(&mut self, grid: &Grid, target: Position) {
        self.columns = grid.columns();
        self.heuristics = grid.cells().map(|c| c.id.euclidean(&target)).collect();
    }

    fn heuristic(&self, pos: Position) -> f64 {
        self.heuristics[pos.row * self.columns + pos.column]
    }
}

impl SearchStrategy for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        target: Position,
        budget: Budget,
    ) -> SearchOutcome {
        self.build_heuristics(grid, target);
        let this = &*self;
        traverse(
            this.name(),
            grid,
            start,
            target,
            budget,
            MinHeapFrontier::default(),
            this.heuristic(start),
            // The score of a cell never changes, so it is queued once. Its
            // predecessor follows the last cell expanded next to it.
            |grid, _current, neighbor| {
                if grid[neighbor].distance.is_infinite() {
                    Relaxation::Queue(this.heuristic(neighbor))
                } else {
                    Relaxation::Relink
                }
            },
        )
    }
}
