use crate::algorithms::common::{
    traverse, Budget, Frontier, Relaxation, SearchOutcome, SearchStrategy,
};
use crate::grid::{Grid, Position};

/// Last-in-first-out frontier. A cell may sit on the stack more than once;
/// only the most recent push for it is live.
#[derive(Debug, Default)]
struct StackFrontier {
    stack: Vec<(Position, f64)>,
}

impl Frontier for StackFrontier {
    fn push(&mut self, pos: Position, distance: f64) {
        self.stack.push((pos, distance));
    }

    fn pop(&mut self) -> Option<(Position, f64)> {
        self.stack.pop()
    }

    fn into_pop_order(mut self) -> Vec<(Position, f64)> {
        self.stack.reverse();
        self.stack
    }
}

/// Depth-first traversal. Distances are hop counts along the DFS tree and do
/// not influence the expansion order.
#[derive(Debug, Default)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst
    }
}

impl SearchStrategy for DepthFirst {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        target: Position,
        budget: Budget,
    ) -> SearchOutcome {
        traverse(
            self.name(),
            grid,
            start,
            target,
            budget,
            StackFrontier::default(),
            0.0,
            |grid, current, _neighbor| Relaxation::Queue(grid[current].distance + 1.0),
        )
    }
}
