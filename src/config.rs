use crate::algorithms::Budget;
use crate::error::{Result, SearchError};
use crate::grid::Position;
use crate::search::Algorithm;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Visualize grid search traversal order", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    #[arg(long, default_value_t = 20)]
    pub columns: usize,

    /// Start cell as `row,col` or `n:row:col`; random in the top-left quadrant if omitted
    #[arg(long)]
    pub start: Option<Position>,

    /// Target cell; random in the bottom-right quadrant if omitted
    #[arg(long)]
    pub target: Option<Position>,

    /// Wall cell, may be repeated
    #[arg(long = "wall")]
    pub walls: Vec<Position>,

    /// Extra walls placed at random
    #[arg(long, default_value_t = 0)]
    pub num_walls: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    /// dijkstra, astar, dfs or all
    #[arg(long, default_value = "dijkstra")]
    pub algorithm: String,

    /// Stop after this many cells have been visited
    #[arg(long)]
    pub max_visited: Option<usize>,

    /// Print the search result as JSON instead of a grid
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Replay the visitation order frame by frame
    #[arg(long, default_value_t = false)]
    pub animate: bool,

    #[arg(long, default_value_t = 30)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, default_value_t = 10)]
    pub num_simulations: usize,

    #[arg(long, default_value = "search_results.csv")]
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 20,
            columns: 20,
            start: None,
            target: None,
            walls: Vec::new(),
            num_walls: 0,
            seed: None,
            algorithm: "dijkstra".to_string(),
            max_visited: None,
            json: false,
            no_visualization: false,
            animate: false,
            delay_ms: 30,
            quiet: false,
            batch_mode: false,
            num_simulations: 10,
            output_file: "search_results.csv".to_string(),
        }
    }
}

impl Config {
    /// The selected algorithms; `all` expands to every strategy.
    pub fn algorithms(&self) -> Result<Vec<Algorithm>> {
        if self.algorithm.eq_ignore_ascii_case("all") {
            Ok(Algorithm::ALL.to_vec())
        } else {
            Ok(vec![self.algorithm.parse()?])
        }
    }

    pub fn compare_all(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("all")
    }

    pub fn budget(&self) -> Result<Budget> {
        Budget::from_option(self.max_visited)
    }

    /// Checks settings that depend on each other.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(SearchError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        self.algorithms()?;
        self.budget()?;

        let cells = self.rows * self.columns;
        if self.num_walls + 2 > cells {
            return Err(SearchError::Config(format!(
                "{} random walls do not fit in a {}x{} grid",
                self.num_walls, self.rows, self.columns
            )));
        }
        if self.batch_mode && self.num_simulations == 0 {
            return Err(SearchError::Config(
                "batch mode needs at least one simulation".to_string(),
            ));
        }
        if self.json && self.animate {
            return Err(SearchError::Config(
                "--json and --animate cannot be combined".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positions_and_walls() {
        let config = Config::try_parse_from([
            "gridsearch",
            "--rows",
            "5",
            "--start",
            "0,0",
            "--target",
            "n:4:4",
            "--wall",
            "1,1",
            "--wall",
            "2,2",
            "--algorithm",
            "astar",
            "--max-visited",
            "7",
        ])
        .unwrap();

        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 20);
        assert_eq!(config.start, Some(Position::new(0, 0)));
        assert_eq!(config.target, Some(Position::new(4, 4)));
        assert_eq!(config.walls, vec![Position::new(1, 1), Position::new(2, 2)]);
        assert_eq!(config.algorithms().unwrap(), vec![Algorithm::AStar]);
        assert_eq!(config.budget().unwrap(), Budget::Limited(7));
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_malformed_position() {
        assert!(Config::try_parse_from(["gridsearch", "--start", "zero"]).is_err());
    }

    #[test]
    fn test_all_expands_to_every_algorithm() {
        let config = Config {
            algorithm: "all".to_string(),
            ..Default::default()
        };
        assert!(config.compare_all());
        assert_eq!(config.algorithms().unwrap().len(), 3);
    }

    #[test]
    fn test_validate() {
        let unknown = Config {
            algorithm: "bfs".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            unknown.validate(),
            Err(SearchError::UnknownAlgorithm(_))
        ));

        let crowded = Config {
            rows: 2,
            columns: 2,
            num_walls: 3,
            ..Default::default()
        };
        assert!(matches!(crowded.validate(), Err(SearchError::Config(_))));

        let zero_budget = Config {
            max_visited: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            zero_budget.validate(),
            Err(SearchError::InvalidBudget)
        ));
    }
}
