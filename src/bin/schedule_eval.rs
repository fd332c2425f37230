//! Schedule evaluation CLI.
//!
//! Loads reference tables from a data directory and a candidate schedule
//! (plain JSON or raw generator output), then prints the evaluation report.
//!
//! # Usage
//!
//! ```bash
//! schedule-eval --data-dir test_data --schedule test_data/schedule.json
//!
//! # Several datasets, JSON output
//! schedule-eval --json \
//!   --data-dir test_data --schedule out/test.json \
//!   --data-dir stress_test_data --schedule out/stress.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: `warn`, `-v` = `info`, `-vv` = `debug`)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use u_schedule_eval::loader::{load_reference_dir, load_schedule_file};
use u_schedule_eval::{EvalConfig, EvalResult, Evaluation, Evaluator};

#[derive(Parser)]
#[command(name = "schedule-eval")]
#[command(about = "Measure correctness of a generated remedial class schedule")]
struct Cli {
    /// Directory holding students.csv, teachers.csv, slots.csv, busy.csv.
    #[arg(long = "data-dir", required = true)]
    data_dirs: Vec<PathBuf>,
    /// Candidate schedule for the data directory at the same position.
    #[arg(long = "schedule", required = true)]
    schedules: Vec<PathBuf>,
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print JSON instead of the text report.
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dataset_label(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn run_dataset(data_dir: &Path, schedule: &Path, config: &EvalConfig) -> EvalResult<Evaluation> {
    let reference = load_reference_dir(data_dir, config)?;
    let schedule = load_schedule_file(schedule)?;
    let evaluator = Evaluator::new(reference, config.clone())?;
    Ok(evaluator.evaluate_detailed(&schedule))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.data_dirs.len() != cli.schedules.len() {
        eprintln!(
            "error: {} --data-dir value(s) but {} --schedule value(s); pass them in pairs",
            cli.data_dirs.len(),
            cli.schedules.len()
        );
        return ExitCode::from(2);
    }

    let config = match &cli.config {
        Some(path) => match EvalConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        },
        None => EvalConfig::default(),
    };

    let mut failed = false;
    for (data_dir, schedule) in cli.data_dirs.iter().zip(&cli.schedules) {
        let label = dataset_label(data_dir);
        match run_dataset(data_dir, schedule, &config) {
            Ok(evaluation) => {
                if cli.json {
                    let doc = serde_json::json!({ "dataset": label, "evaluation": evaluation });
                    println!("{doc}");
                } else {
                    println!("{}", evaluation.render(&label));
                }
            }
            Err(e) => {
                error!(dataset = %label, "evaluation failed: {e}");
                eprintln!("Failed to evaluate {label}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
