use crate::algorithms::common::{
    traverse, Budget, MinHeapFrontier, Relaxation, SearchOutcome, SearchStrategy,
};
use crate::grid::{Grid, Position};

/// Uniform-cost Dijkstra over orthogonal unit steps.
///
/// A neighbor is relaxed only when the new distance improves on the recorded
/// one; the superseded heap entry is skipped when popped.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl SearchStrategy for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
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
            MinHeapFrontier::default(),
            0.0,
            |grid, current, neighbor| {
                let candidate = grid[current].distance + 1.0;
                if candidate < grid[neighbor].distance {
                    Relaxation::Queue(candidate)
                } else {
                    Relaxation::Keep
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn open_grid(rows: usize, columns: usize, start: Position, target: Position) -> Grid {
        Grid::build(rows, columns, start, target, &FxHashSet::default()).unwrap()
    }

    #[test]
    fn test_corner_to_corner() {
        let start = Position::new(0, 0);
        let target = Position::new(2, 2);
        let mut grid = open_grid(3, 3, start, target);

        let outcome = Dijkstra::new().search(&mut grid, start, target, Budget::Unbounded);

        assert_eq!(outcome.steps_to_find, Some(4));
        assert_eq!(outcome.visited_in_order.first().unwrap().id, start);
        assert_eq!(outcome.visited_in_order.last().unwrap().id, target);
        assert_eq!(grid[target].distance, 4.0);
        // Every cell is at most 4 away, so the whole grid is expanded.
        assert_eq!(outcome.visited_in_order.len(), 9);
        assert!(outcome.pending.is_empty());
    }

    #[test]
    fn test_visits_in_nondecreasing_distance() {
        let start = Position::new(2, 2);
        let target = Position::new(4, 4);
        let mut grid = open_grid(5, 5, start, target);

        let outcome = Dijkstra::new().search(&mut grid, start, target, Budget::Unbounded);

        let distances: Vec<f64> = outcome.visited_in_order.iter().map(|c| c.distance).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        for cell in &outcome.visited_in_order {
            assert_eq!(cell.distance as usize, cell.id.manhattan(&start));
        }
    }

    #[test]
    fn test_ties_expand_in_insertion_order() {
        let start = Position::new(1, 1);
        let target = Position::new(2, 2);
        let mut grid = open_grid(3, 3, start, target);

        let outcome = Dijkstra::new().search(&mut grid, start, target, Budget::Unbounded);

        let order: Vec<Position> = outcome.visited_in_order.iter().map(|c| c.id).collect();
        assert_eq!(
            &order[..5],
            &[
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_pending_is_live_frontier() {
        let start = Position::new(0, 0);
        let target = Position::new(0, 4);
        let mut grid = open_grid(1, 5, start, target);

        let outcome = Dijkstra::new().search(&mut grid, start, target, Budget::Limited(2));

        assert_eq!(outcome.steps_to_find, None);
        assert_eq!(outcome.visited_in_order.len(), 2);
        let pending: Vec<Position> = outcome.pending.iter().map(|c| c.id).collect();
        assert_eq!(pending, vec![Position::new(0, 2)]);
        assert_eq!(outcome.pending[0].distance, 2.0);
    }
}
