use crate::error::{Result, SearchError};
use log::warn;
use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// A `(row, column)` coordinate. Doubles as the identity of a cell and as the
/// predecessor link written by the search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }

    /// Straight-line distance to `other`.
    pub fn euclidean(&self, other: &Position) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.column as f64 - other.column as f64;
        (dr * dr + dc * dc).sqrt()
    }

    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

/// Renders the cell identity, `n:{row}:{column}`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n:{}:{}", self.row, self.column)
    }
}

/// Serialized as its identity text, the same form `FromStr` accepts.
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses either the identity form `n:{row}:{column}` or a bare `row,column`.
impl FromStr for Position {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SearchError::InvalidPosition(s.to_string());
        let trimmed = s.trim();
        let (row, column) = if let Some(rest) = trimmed.strip_prefix("n:") {
            rest.split_once(':').ok_or_else(invalid)?
        } else {
            trimmed.split_once(',').ok_or_else(invalid)?
        };
        let row = row.trim().parse().map_err(|_| invalid())?;
        let column = column.trim().parse().map_err(|_| invalid())?;
        Ok(Position { row, column })
    }
}

/// One grid unit together with the search state written into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub id: Position,
    pub is_start: bool,
    pub is_finish: bool,
    pub is_wall: bool,
    pub is_visited: bool,
    pub is_on_shortest_path: bool,
    pub distance: f64,
    pub previous: Option<Position>,
}

impl Cell {
    fn new(id: Position) -> Self {
        Cell {
            id,
            is_start: false,
            is_finish: false,
            is_wall: false,
            is_visited: false,
            is_on_shortest_path: false,
            distance: f64::INFINITY,
            previous: None,
        }
    }

    pub fn row(&self) -> usize {
        self.id.row
    }

    pub fn column(&self) -> usize {
        self.id.column
    }
}

/// A rectangular matrix of cells, stored row-major.
///
/// The grid is the mutable state of a single search run: strategies write
/// visitation flags, distances and predecessor links into it, so a fresh grid
/// has to be built for every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    start: Position,
    target: Position,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid with every cell unvisited at infinite distance.
    ///
    /// Walls outside the grid are ignored. Walls placed on the start or the
    /// target are kept as given.
    pub fn build(
        rows: usize,
        columns: usize,
        start: Position,
        target: Position,
        walls: &FxHashSet<Position>,
    ) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(SearchError::InvalidDimensions { rows, columns });
        }
        for (role, position) in [("start", start), ("target", target)] {
            if position.row >= rows || position.column >= columns {
                return Err(SearchError::OutOfBounds {
                    role,
                    position,
                    rows,
                    columns,
                });
            }
        }

        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let id = Position::new(row, column);
                let mut cell = Cell::new(id);
                cell.is_start = id == start;
                cell.is_finish = id == target;
                cell.is_wall = walls.contains(&id);
                cells.push(cell);
            }
        }

        let outside = walls
            .iter()
            .filter(|w| w.row >= rows || w.column >= columns)
            .count();
        if outside > 0 {
            warn!("ignoring {} wall(s) outside the {}x{} grid", outside, rows, columns);
        }

        Ok(Grid {
            rows,
            columns,
            start,
            target,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[pos.row * self.columns + pos.column])
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        let begin = row * self.columns;
        &self.cells[begin..begin + self.columns]
    }

    /// Orthogonal neighbors inside the grid, in the order up, down, left, right.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        if pos.row > 0 {
            neighbors.push(Position::new(pos.row - 1, pos.column));
        }
        if pos.row + 1 < self.rows {
            neighbors.push(Position::new(pos.row + 1, pos.column));
        }
        if pos.column > 0 {
            neighbors.push(Position::new(pos.row, pos.column - 1));
        }
        if pos.column + 1 < self.columns {
            neighbors.push(Position::new(pos.row, pos.column + 1));
        }
        neighbors
    }

    /// Orthogonal neighbors that have not been visited yet.
    pub fn unvisited_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|n| !self[*n].is_visited)
            .collect()
    }

    /// All eight surrounding cells inside the grid, row-major.
    /// Not used by the search strategies, which only move orthogonally.
    pub fn all_neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let row = pos.row as i64 + dr;
                let column = pos.column as i64 + dc;
                if row >= 0 && column >= 0 {
                    let next = Position::new(row as usize, column as usize);
                    if self.contains(next) {
                        neighbors.push(next);
                    }
                }
            }
        }
        neighbors
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.cells[pos.row * self.columns + pos.column]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row * self.columns + pos.column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walls(cells: &[(usize, usize)]) -> FxHashSet<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_build_flags_cells() {
        let grid = Grid::build(
            3,
            4,
            Position::new(0, 0),
            Position::new(2, 3),
            &walls(&[(1, 1), (1, 2)]),
        )
        .unwrap();

        assert_eq!(grid.len(), 12);
        assert!(grid[Position::new(0, 0)].is_start);
        assert!(grid[Position::new(2, 3)].is_finish);
        assert!(grid[Position::new(1, 1)].is_wall);
        assert!(grid[Position::new(1, 2)].is_wall);
        assert_eq!(grid.cells().filter(|c| c.is_wall).count(), 2);
        assert!(grid
            .cells()
            .all(|c| !c.is_visited && c.distance.is_infinite() && c.previous.is_none()));
        assert_eq!(grid.row(2)[3].id, Position::new(2, 3));
    }

    #[test]
    fn test_build_is_deterministic() {
        let w = walls(&[(0, 2), (3, 1)]);
        let a = Grid::build(4, 4, Position::new(0, 0), Position::new(3, 3), &w).unwrap();
        let b = Grid::build(4, 4, Position::new(0, 0), Position::new(3, 3), &w).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_rejects_bad_input() {
        let none = FxHashSet::default();
        assert!(matches!(
            Grid::build(0, 3, Position::new(0, 0), Position::new(0, 0), &none),
            Err(SearchError::InvalidDimensions { rows: 0, columns: 3 })
        ));
        assert!(matches!(
            Grid::build(3, 3, Position::new(3, 0), Position::new(0, 0), &none),
            Err(SearchError::OutOfBounds { role: "start", .. })
        ));
        assert!(matches!(
            Grid::build(3, 3, Position::new(0, 0), Position::new(1, 5), &none),
            Err(SearchError::OutOfBounds { role: "target", .. })
        ));
    }

    #[test]
    fn test_walls_outside_grid_are_ignored() {
        let grid = Grid::build(
            2,
            2,
            Position::new(0, 0),
            Position::new(1, 1),
            &walls(&[(5, 5)]),
        )
        .unwrap();
        assert!(grid.cells().all(|c| !c.is_wall));
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::build(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &FxHashSet::default(),
        )
        .unwrap();

        assert_eq!(
            grid.neighbors(Position::new(1, 1)),
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
        assert_eq!(
            grid.neighbors(Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(0, 1)]
        );
        assert_eq!(
            grid.neighbors(Position::new(2, 2)),
            vec![Position::new(1, 2), Position::new(2, 1)]
        );
    }

    #[test]
    fn test_unvisited_neighbors_reflect_mutation() {
        let mut grid = Grid::build(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &FxHashSet::default(),
        )
        .unwrap();
        grid[Position::new(0, 1)].is_visited = true;

        assert_eq!(
            grid.unvisited_neighbors(Position::new(1, 1)),
            vec![Position::new(2, 1), Position::new(1, 0), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_all_neighbors() {
        let grid = Grid::build(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &FxHashSet::default(),
        )
        .unwrap();
        assert_eq!(grid.all_neighbors(Position::new(1, 1)).len(), 8);
        assert_eq!(
            grid.all_neighbors(Position::new(0, 0)),
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_position_identity_round_trip() {
        let pos = Position::new(12, 7);
        assert_eq!(pos.to_string(), "n:12:7");
        assert_eq!("n:12:7".parse::<Position>().unwrap(), pos);
        assert_eq!(" 12 , 7 ".parse::<Position>().unwrap(), pos);
        assert!("n:12".parse::<Position>().is_err());
        assert!("a,b".parse::<Position>().is_err());
    }

    #[test]
    fn test_cells_serialize_identity_text() {
        let mut cell = Cell::new(Position::new(2, 3));
        assert_eq!(serde_json::to_value(Position::new(2, 3)).unwrap(), "n:2:3");

        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(json["id"], "n:2:3");
        assert!(json["previous"].is_null());

        cell.previous = Some(Position::new(1, 3));
        let json = serde_json::to_value(cell).unwrap();
        let previous: Position = json["previous"].as_str().unwrap().parse().unwrap();
        assert_eq!(previous, Position::new(1, 3));
    }

    #[test]
    fn test_distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan(&b), 7);
        assert!((a.euclidean(&b) - 5.0).abs() < 1e-12);
    }
}
