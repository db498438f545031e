use crate::error::{Result, SearchError};
use crate::grid::{Cell, Grid, Position};
use crate::path::predecessor_chain;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Upper bound on the number of cells a run may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    #[default]
    Unbounded,
    Limited(usize),
}

impl Budget {
    pub fn from_option(max_visited: Option<usize>) -> Result<Self> {
        match max_visited {
            None => Ok(Budget::Unbounded),
            Some(0) => Err(SearchError::InvalidBudget),
            Some(n) => Ok(Budget::Limited(n)),
        }
    }

    pub fn allows(&self, visited: usize) -> bool {
        match self {
            Budget::Unbounded => true,
            Budget::Limited(max) => visited < *max,
        }
    }
}

/// What a strategy hands back after one traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    pub visited_in_order: Vec<Cell>,
    /// Frontier left at termination, next-to-expand first.
    pub pending: Vec<Cell>,
    /// Moves along the discovered route to the target; `None` when the target
    /// was not reached.
    pub steps_to_find: Option<usize>,
}

impl SearchOutcome {
    /// Outcome for a run whose start already is the target.
    pub fn already_there() -> Self {
        SearchOutcome {
            steps_to_find: Some(0),
            ..Default::default()
        }
    }
}

pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    /// Traverses `grid` from `start` towards `target`, writing visitation
    /// flags, distances and predecessor links into the grid.
    fn search(
        &mut self,
        grid: &mut Grid,
        start: Position,
        target: Position,
        budget: Budget,
    ) -> SearchOutcome;
}

/// Pending-set discipline of a strategy.
pub(crate) trait Frontier {
    fn push(&mut self, pos: Position, distance: f64);
    fn pop(&mut self) -> Option<(Position, f64)>;
    /// Remaining entries, next-to-pop first.
    fn into_pop_order(self) -> Vec<(Position, f64)>;
}

/// Heap entry. `Ord` is reversed so `BinaryHeap` pops the smallest distance,
/// and among equal distances the earliest insertion.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    seq: u64,
    pos: Position,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority-ordered frontier shared by Dijkstra and A*.
#[derive(Debug, Default)]
pub(crate) struct MinHeapFrontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier for MinHeapFrontier {
    fn push(&mut self, pos: Position, distance: f64) {
        self.heap.push(FrontierEntry {
            distance,
            seq: self.next_seq,
            pos,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<(Position, f64)> {
        self.heap.pop().map(|e| (e.pos, e.distance))
    }

    fn into_pop_order(self) -> Vec<(Position, f64)> {
        let mut entries = self.heap.into_sorted_vec();
        entries.reverse();
        entries.into_iter().map(|e| (e.pos, e.distance)).collect()
    }
}

/// What a strategy does with an unvisited, non-wall neighbor of the cell
/// being expanded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Relaxation {
    /// Leave the neighbor untouched.
    Keep,
    /// Point the neighbor's predecessor at the expanded cell without queueing
    /// it again.
    Relink,
    /// Record the distance and predecessor, then push the neighbor.
    Queue(f64),
}

/// Runs the traversal loop common to every strategy.
///
/// `relax(grid, current, neighbor)` decides, for every unvisited, non-wall
/// neighbor of the expanded cell, whether its distance, its predecessor link
/// or neither is updated.
#[allow(clippy::too_many_arguments)]
pub(crate) fn traverse<F, R>(
    name: &str,
    grid: &mut Grid,
    start: Position,
    target: Position,
    budget: Budget,
    mut frontier: F,
    seed_distance: f64,
    mut relax: R,
) -> SearchOutcome
where
    F: Frontier,
    R: FnMut(&Grid, Position, Position) -> Relaxation,
{
    if start == target {
        debug!("{}: start {} is the target", name, start);
        return SearchOutcome::already_there();
    }

    debug!("{}: searching {} -> {} ({:?})", name, start, target, budget);

    let mut visited_in_order = Vec::new();
    let mut steps_to_find = None;

    if grid[start].is_wall {
        debug!("{}: start {} is a wall", name, start);
        return SearchOutcome::default();
    }

    grid[start].distance = seed_distance;
    frontier.push(start, seed_distance);

    while budget.allows(visited_in_order.len()) {
        let Some((current, distance)) = frontier.pop() else {
            debug!("{}: frontier exhausted after {} expansions", name, visited_in_order.len());
            break;
        };

        let cell = grid[current];
        // Superseded by a later, better entry for the same cell.
        if cell.is_visited || cell.distance != distance {
            continue;
        }
        if cell.is_wall {
            continue;
        }
        if distance.is_infinite() {
            debug!("{}: trapped at {}", name, current);
            break;
        }

        grid[current].is_visited = true;
        grid[current].distance = distance;
        visited_in_order.push(grid[current]);
        trace!("{}: expanded {} at distance {}", name, current, distance);

        if current == target {
            let steps = predecessor_chain(grid, target).len().saturating_sub(1);
            debug!(
                "{}: reached {} after {} expansions, {} steps",
                name,
                target,
                visited_in_order.len(),
                steps
            );
            steps_to_find = Some(steps);
            break;
        }

        for neighbor in grid.unvisited_neighbors(current) {
            if grid[neighbor].is_wall {
                continue;
            }
            match relax(&*grid, current, neighbor) {
                Relaxation::Keep => {}
                Relaxation::Relink => grid[neighbor].previous = Some(current),
                Relaxation::Queue(next_distance) => {
                    grid[neighbor].distance = next_distance;
                    grid[neighbor].previous = Some(current);
                    frontier.push(neighbor, next_distance);
                }
            }
        }
    }

    if steps_to_find.is_none() && !budget.allows(visited_in_order.len()) {
        debug!("{}: budget exhausted before reaching {}", name, target);
    }

    let mut seen = FxHashSet::default();
    let pending = frontier
        .into_pop_order()
        .into_iter()
        .filter(|(pos, distance)| {
            let cell = &grid[*pos];
            !cell.is_visited && cell.distance == *distance && seen.insert(*pos)
        })
        .map(|(pos, _)| grid[pos])
        .collect();

    SearchOutcome {
        visited_in_order,
        pending,
        steps_to_find,
    }
}
