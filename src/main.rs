use clap::Parser;
use log::info;

use gridsearch::batch::BatchRunner;
use gridsearch::comparison::{compare_algorithms, print_comparison, run_measured};
use gridsearch::config::Config;
use gridsearch::environment::Environment;
use gridsearch::render::{animate, render_result, LEGEND};
use gridsearch::{Algorithm, Result};
use std::time::Duration;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    if config.batch_mode {
        let mut batch = BatchRunner::new(config.clone());
        batch.run()?;
        if !config.quiet {
            batch.print_summary();
        }
        return Ok(());
    }

    let environment = Environment::generate(&config, config.seed)?;
    let budget = config.budget()?;
    if !config.quiet {
        info!(
            "grid {}x{}, start {}, target {}, {} walls, seed {}",
            environment.rows,
            environment.columns,
            environment.start,
            environment.target,
            environment.walls.len(),
            environment.seed
        );
    }

    if config.compare_all() {
        let results = compare_algorithms(&environment, budget)?;
        print_comparison(&results);
        return Ok(());
    }

    let algorithm: Algorithm = config.algorithm.parse()?;
    let measured = run_measured(&environment, algorithm, budget)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&measured.result)?);
        return Ok(());
    }

    if !config.no_visualization {
        if config.animate {
            animate(&measured.grid, &measured.result, Duration::from_millis(config.delay_ms));
        } else {
            println!("{}", LEGEND);
            print!("{}", render_result(&measured.grid, &measured.result));
        }
        println!();
    }
    print!("{}", measured.statistics);
    Ok(())
}
