//! ASCII rendering of a searched grid.

use crate::grid::{Cell, Grid, Position};
use crate::search::SearchResult;
use rustc_hash::FxHashSet;
use std::fmt::Write;
use std::thread;
use std::time::Duration;

pub const LEGEND: &str = "Legend: S=Start, T=Target, #=Wall, *=Path, o=Visited, +=Pending, .=Empty";

/// Draws `grid` with the given visited, pending and path cells marked.
///
/// Markers take precedence in the order start/target, wall, path, visited,
/// pending.
pub fn render_frame(grid: &Grid, visited: &[Cell], pending: &[Cell], path: &[Cell]) -> String {
    let visited: FxHashSet<Position> = visited.iter().map(|c| c.id).collect();
    let pending: FxHashSet<Position> = pending.iter().map(|c| c.id).collect();
    let path: FxHashSet<Position> = path.iter().map(|c| c.id).collect();

    let mut out = String::new();
    out.push_str("   ");
    for column in 0..grid.columns() {
        let _ = write!(out, "{:2}", column % 10);
    }
    out.push('\n');

    for row in 0..grid.rows() {
        let _ = write!(out, "{:2} ", row);
        for cell in grid.row(row) {
            let marker = if cell.is_start {
                'S'
            } else if cell.is_finish {
                'T'
            } else if cell.is_wall {
                '#'
            } else if path.contains(&cell.id) {
                '*'
            } else if visited.contains(&cell.id) {
                'o'
            } else if pending.contains(&cell.id) {
                '+'
            } else {
                '.'
            };
            let _ = write!(out, " {}", marker);
        }
        out.push('\n');
    }
    out
}

/// The final state of a search: every visited cell, the leftover frontier
/// and the reconstructed route.
pub fn render_result(grid: &Grid, result: &SearchResult) -> String {
    render_frame(
        grid,
        &result.visited_in_order,
        &result.pending,
        &result.shortest_path,
    )
}

/// Replays the visitation order one cell per frame, then shows the route.
pub fn animate(grid: &Grid, result: &SearchResult, delay: Duration) {
    for shown in 1..=result.visited_in_order.len() {
        clear_screen();
        println!("=== {} | expanded {} ===", result.algorithm, shown);
        println!("{}", LEGEND);
        print!(
            "{}",
            render_frame(grid, &result.visited_in_order[..shown], &[], &[])
        );
        thread::sleep(delay);
    }
    clear_screen();
    println!("=== {} | done ===", result.algorithm);
    println!("{}", LEGEND);
    print!("{}", render_result(grid, result));
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
