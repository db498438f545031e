use crate::algorithms::Budget;
use crate::environment::Environment;
use crate::error::Result;
use crate::grid::Grid;
use crate::search::{run_with_grid, Algorithm, SearchResult};
use crate::statistics::{optimal_path_length, RunStatistics};
use log::info;
use std::time::Instant;

/// One timed algorithm run together with its final grid.
#[derive(Debug, Clone)]
pub struct MeasuredRun {
    pub grid: Grid,
    pub result: SearchResult,
    pub statistics: RunStatistics,
}

/// Runs `algorithm` on a fresh grid built from `environment` and times it.
pub fn run_measured(
    environment: &Environment,
    algorithm: Algorithm,
    budget: Budget,
) -> Result<MeasuredRun> {
    let request = environment.request(algorithm, budget);
    let started = Instant::now();
    let (grid, result) = run_with_grid(&request)?;
    let elapsed = started.elapsed();

    let statistics = RunStatistics::new(&result, optimal_path_length(&grid), elapsed);
    Ok(MeasuredRun {
        grid,
        result,
        statistics,
    })
}

/// Runs every algorithm on the same environment, each on its own grid.
pub fn compare_algorithms(environment: &Environment, budget: Budget) -> Result<Vec<RunStatistics>> {
    info!(
        "comparing {} algorithms on {}x{} (seed {}, {} walls)",
        Algorithm::ALL.len(),
        environment.rows,
        environment.columns,
        environment.seed,
        environment.walls.len()
    );

    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let run = run_measured(environment, algorithm, budget)?;
            info!(
                "completed {}: found {}, {} expanded",
                algorithm, run.statistics.found, run.statistics.expansions
            );
            Ok(run.statistics)
        })
        .collect()
}

/// Formats the comparison as an aligned table followed by a short analysis.
pub fn format_comparison(results: &[RunStatistics]) -> String {
    let mut out = String::new();
    out.push_str("=== ALGORITHM COMPARISON RESULTS ===\n\n");
    out.push_str(&format!(
        "{:<10} {:<8} {:<8} {:<10} {:<8} {:<8} {:<10} {:<12}\n",
        "Algorithm", "Found", "Steps", "Expanded", "Pending", "Optimal", "Efficiency", "Time"
    ));
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for stats in results {
        let found = if stats.found { "yes" } else { "no" };
        let steps = stats
            .steps_to_find
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let optimal = stats
            .optimal_path_length
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        out.push_str(&format!(
            "{:<10} {:<8} {:<8} {:<10} {:<8} {:<8} {:<10.3} {:<12}\n",
            stats.algorithm.name(),
            found,
            steps,
            stats.expansions,
            stats.pending,
            optimal,
            stats.route_efficiency,
            format!("{:.2?}", stats.elapsed)
        ));
    }
    out.push('\n');

    let successful: Vec<&RunStatistics> = results.iter().filter(|r| r.found).collect();
    if successful.is_empty() {
        out.push_str("No algorithm reached the target.\n");
        return out;
    }

    out.push_str("=== PERFORMANCE ANALYSIS ===\n");
    if let Some(fewest) = successful.iter().min_by_key(|r| r.expansions) {
        out.push_str(&format!(
            "Fewest expansions: {} ({} cells)\n",
            fewest.algorithm, fewest.expansions
        ));
    }
    if let Some(fastest) = successful.iter().min_by_key(|r| r.elapsed) {
        out.push_str(&format!(
            "Fastest: {} ({:.2?})\n",
            fastest.algorithm, fastest.elapsed
        ));
    }
    let optimal: Vec<&str> = successful
        .iter()
        .filter(|r| r.is_optimal())
        .map(|r| r.algorithm.name())
        .collect();
    out.push_str(&format!("Shortest route found by: {}\n", optimal.join(", ")));
    out
}

pub fn print_comparison(results: &[RunStatistics]) {
    println!("{}", format_comparison(results));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::grid::Position;

    fn environment() -> Environment {
        let config = Config {
            rows: 6,
            columns: 6,
            start: Some(Position::new(0, 0)),
            target: Some(Position::new(5, 5)),
            walls: vec![Position::new(2, 2), Position::new(3, 3)],
            ..Default::default()
        };
        Environment::generate(&config, Some(1)).unwrap()
    }

    #[test]
    fn test_compare_runs_every_algorithm_on_same_layout() {
        let results = compare_algorithms(&environment(), Budget::Unbounded).unwrap();

        let names: Vec<Algorithm> = results.iter().map(|r| r.algorithm).collect();
        assert_eq!(names, Algorithm::ALL.to_vec());
        assert!(results.iter().all(|r| r.found));
        assert!(results.iter().all(|r| r.optimal_path_length == Some(10)));
        let dijkstra = &results[0];
        assert!(dijkstra.is_optimal());
    }

    #[test]
    fn test_format_comparison() {
        let results = compare_algorithms(&environment(), Budget::Unbounded).unwrap();
        let table = format_comparison(&results);

        assert!(table.contains("ALGORITHM COMPARISON RESULTS"));
        for algorithm in Algorithm::ALL {
            assert!(table.contains(algorithm.name()));
        }
        assert!(table.contains("Shortest route found by: dijkstra"));
    }

    #[test]
    fn test_format_comparison_without_success() {
        let results = compare_algorithms(&environment(), Budget::Limited(1)).unwrap();
        assert!(results.iter().all(|r| !r.found));
        assert!(format_comparison(&results).contains("No algorithm reached the target."));
    }

    #[test]
    fn test_run_measured_keeps_grid() {
        let run = run_measured(&environment(), Algorithm::AStar, Budget::Unbounded).unwrap();
        assert!(run.grid[Position::new(5, 5)].is_visited);
        assert_eq!(run.statistics.expansions, run.result.visited_in_order.len());
    }
}
