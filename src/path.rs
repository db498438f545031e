//! Route reconstruction from the predecessor links left by a search.

use crate::grid::{Cell, Grid, Position};
use log::warn;

/// Positions from `from` back along `previous` links, ending at the first
/// cell without a predecessor. The walk never takes more steps than the grid
/// has cells.
pub fn predecessor_chain(grid: &Grid, from: Position) -> Vec<Position> {
    let mut chain = vec![from];
    let mut current = from;
    while let Some(previous) = grid[current].previous {
        if chain.len() >= grid.len() {
            warn!("predecessor chain from {} does not terminate", from);
            break;
        }
        chain.push(previous);
        current = previous;
    }
    chain
}

/// Cells on the route from the start to `target`, start first.
///
/// Returns just the start when `target` is the start cell, and an empty path
/// when `target` was never reached.
pub fn reconstruct_path(grid: &Grid, target: Position) -> Vec<Cell> {
    let finish = grid[target];
    if finish.is_start {
        return vec![finish];
    }
    if !finish.is_visited {
        return Vec::new();
    }
    predecessor_chain(grid, target)
        .into_iter()
        .rev()
        .map(|pos| grid[pos])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn grid_3x3() -> Grid {
        Grid::build(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &FxHashSet::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_reconstruct_follows_links() {
        let mut grid = grid_3x3();
        let route = [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(2, 2),
        ];
        for pair in route.windows(2) {
            grid[pair[1]].previous = Some(pair[0]);
        }
        for pos in route {
            grid[pos].is_visited = true;
        }

        let path: Vec<Position> = reconstruct_path(&grid, Position::new(2, 2))
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(path, route.to_vec());
    }

    #[test]
    fn test_unreached_target_gives_empty_path() {
        let mut grid = grid_3x3();
        // Discovered but never expanded.
        grid[Position::new(2, 2)].previous = Some(Position::new(2, 1));
        assert!(reconstruct_path(&grid, Position::new(2, 2)).is_empty());
    }

    #[test]
    fn test_start_is_target() {
        let grid = Grid::build(
            2,
            2,
            Position::new(1, 1),
            Position::new(1, 1),
            &FxHashSet::default(),
        )
        .unwrap();
        let path = reconstruct_path(&grid, Position::new(1, 1));
        assert_eq!(path.len(), 1);
        assert!(path[0].is_start && path[0].is_finish);
    }

    #[test]
    fn test_chain_is_bounded() {
        let mut grid = grid_3x3();
        grid[Position::new(0, 1)].previous = Some(Position::new(0, 2));
        grid[Position::new(0, 2)].previous = Some(Position::new(0, 1));
        assert_eq!(predecessor_chain(&grid, Position::new(0, 1)).len(), grid.len());
    }
}
