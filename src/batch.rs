use crate::comparison::run_measured;
use crate::config::Config;
use crate::environment::Environment;
use crate::error::Result;
use crate::search::Algorithm;
use crate::statistics::RunStatistics;
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

const CSV_HEADER: &str = "simulation_id,seed,algorithm,rows,columns,num_walls,found,steps_to_find,expansions,pending,path_steps,optimal_path_length,route_efficiency,elapsed_ns";

#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub simulation_id: usize,
    pub seed: u64,
    pub rows: usize,
    pub columns: usize,
    pub num_walls: usize,
    pub statistics: RunStatistics,
}

impl BatchRecord {
    fn csv_row(&self) -> String {
        let s = &self.statistics;
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{:.6},{}",
            self.simulation_id,
            self.seed,
            s.algorithm,
            self.rows,
            self.columns,
            self.num_walls,
            s.found,
            s.steps_to_find.map_or(-1, |v| v as i64),
            s.expansions,
            s.pending,
            s.path_steps,
            s.optimal_path_length.map_or(-1, |v| v as i64),
            s.route_efficiency,
            s.elapsed.as_nanos()
        )
    }
}

/// Runs many seeded environments and streams the statistics to a CSV file.
pub struct BatchRunner {
    config: Config,
    results: Vec<BatchRecord>,
    summary: Vec<BatchRecord>,
    batch_size: usize,
    total_results_written: usize,
    start_time: Instant,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        BatchRunner {
            config,
            results: Vec::new(),
            summary: Vec::new(),
            batch_size: 100,
            total_results_written: 0,
            start_time: Instant::now(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn run(&mut self) -> Result<()> {
        let algorithms = self.config.algorithms()?;
        let budget = self.config.budget()?;
        let base_seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        self.start_time = Instant::now();

        self.initialize_csv_file()?;
        info!(
            "batch of {} simulations on {}x{} with {} random walls, base seed {}",
            self.config.num_simulations,
            self.config.rows,
            self.config.columns,
            self.config.num_walls,
            base_seed
        );

        let mut last_progress_report = Instant::now();
        let progress_interval = Duration::from_secs(10);

        for simulation_id in 0..self.config.num_simulations {
            let seed = base_seed.wrapping_add(simulation_id as u64);
            let environment = Environment::generate(&self.config, Some(seed))?;

            for &algorithm in &algorithms {
                let run = run_measured(&environment, algorithm, budget)?;
                self.results.push(BatchRecord {
                    simulation_id,
                    seed,
                    rows: environment.rows,
                    columns: environment.columns,
                    num_walls: environment.walls.len(),
                    statistics: run.statistics,
                });
            }

            if self.results.len() >= self.batch_size {
                self.flush_results_to_csv()?;
            }

            if last_progress_report.elapsed() > progress_interval {
                let done = simulation_id + 1;
                info!(
                    "progress: {}/{} simulations ({:.1}%) in {:.1}s",
                    done,
                    self.config.num_simulations,
                    done as f64 / self.config.num_simulations as f64 * 100.0,
                    self.start_time.elapsed().as_secs_f64()
                );
                last_progress_report = Instant::now();
            }
        }

        self.flush_results_to_csv()?;
        info!(
            "batch completed: {} results in {:.2?} -> {}",
            self.total_results_written,
            self.start_time.elapsed(),
            self.config.output_file
        );
        Ok(())
    }

    pub fn total_results_written(&self) -> usize {
        self.total_results_written
    }

    fn initialize_csv_file(&self) -> Result<()> {
        let mut file = File::create(&self.config.output_file)?;
        writeln!(file, "{}", CSV_HEADER)?;
        debug!("initialized CSV file {}", self.config.output_file);
        Ok(())
    }

    fn flush_results_to_csv(&mut self) -> Result<()> {
        if self.results.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.config.output_file)?;
        let mut writer = BufWriter::new(file);
        for record in &self.results {
            writeln!(writer, "{}", record.csv_row())?;
        }
        writer.flush()?;

        self.total_results_written += self.results.len();
        debug!(
            "flushed {} results to CSV (total: {})",
            self.results.len(),
            self.total_results_written
        );
        self.summary.append(&mut self.results);
        Ok(())
    }

    /// Per-algorithm success rate and averages over the successful runs.
    pub fn format_summary(&self) -> String {
        if self.summary.is_empty() {
            return "No results to summarize.\n".to_string();
        }

        let mut out = String::from("=== BATCH SUMMARY ===\n");
        for algorithm in Algorithm::ALL {
            let runs: Vec<&RunStatistics> = self
                .summary
                .iter()
                .map(|r| &r.statistics)
                .filter(|s| s.algorithm == algorithm)
                .collect();
            if runs.is_empty() {
                continue;
            }

            let successful: Vec<&&RunStatistics> = runs.iter().filter(|s| s.found).collect();
            out.push_str(&format!("\n{} results:\n", algorithm));
            out.push_str(&format!(
                "  Success rate: {}/{} ({:.1}%)\n",
                successful.len(),
                runs.len(),
                successful.len() as f64 / runs.len() as f64 * 100.0
            ));
            if !successful.is_empty() {
                let n = successful.len() as f64;
                let avg_expanded = successful.iter().map(|s| s.expansions as f64).sum::<f64>() / n;
                let avg_steps = successful.iter().map(|s| s.path_steps as f64).sum::<f64>() / n;
                let avg_time = successful.iter().map(|s| s.elapsed).sum::<Duration>() / successful.len() as u32;
                out.push_str(&format!("  Average expansions: {:.1}\n", avg_expanded));
                out.push_str(&format!("  Average route length: {:.1}\n", avg_steps));
                out.push_str(&format!("  Average search time: {:.2?}\n", avg_time));
            }
        }
        out
    }

    pub fn print_summary(&self) {
        print!("{}", self.format_summary());
    }
}
