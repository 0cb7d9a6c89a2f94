// scaling_bench - benchmark driver
// Sweeps worker pool and task executor over 1..N workers and writes a CSV table

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use scaling_bench::config::{
    DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_RESULTS_FILE, DEFAULT_WARMUP_LIMIT,
};
use scaling_bench::pipeline::DEFAULT_BRIGHTNESS;
use scaling_bench::{BenchConfig, ConsoleReporter, Paradigm, Session};

#[derive(Parser)]
#[command(name = "scaling_bench", version, about = "Worker pool vs task executor image pipeline scaling benchmark")]
struct Args {
    /// Directory of input images
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory for processed images
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Skip writing processed images
    #[arg(long, default_value_t = false)]
    no_output: bool,

    /// CSV file for the result table (overwritten)
    #[arg(long, default_value = DEFAULT_RESULTS_FILE)]
    results_file: PathBuf,

    /// Worker counts to sweep, ascending and starting at 1
    #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2, 4, 8])]
    workers: Vec<usize>,

    /// Paradigms to run (pool, tasks); defaults to both
    #[arg(long = "paradigm", value_parser = parse_paradigm)]
    paradigms: Vec<Paradigm>,

    /// Pause before each timed run, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pause_ms: u64,

    /// Maximum number of images in the untimed warm-up (0 disables it)
    #[arg(long, default_value_t = DEFAULT_WARMUP_LIMIT)]
    warmup_limit: usize,

    /// Brightness offset added in the last pipeline stage
    #[arg(long, default_value_t = DEFAULT_BRIGHTNESS)]
    brightness: u8,
}

fn parse_paradigm(name: &str) -> std::result::Result<Paradigm, String> {
    Paradigm::parse(name).ok_or_else(|| format!("unknown paradigm '{}' (expected pool or tasks)", name))
}

impl Args {
    fn into_config(self) -> BenchConfig {
        let paradigms = if self.paradigms.is_empty() {
            Paradigm::ALL.to_vec()
        } else {
            self.paradigms
        };

        BenchConfig {
            input_dir: self.input_dir,
            output_dir: (!self.no_output).then_some(self.output_dir),
            results_file: self.results_file,
            worker_counts: self.workers,
            paradigms,
            pause: Duration::from_millis(self.pause_ms),
            warmup_limit: self.warmup_limit,
            brightness: self.brightness,
            ..BenchConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Args::parse().into_config();

    info!("Input: {}", config.input_dir.display());
    info!("Results: {}", config.results_file.display());

    let session = Session::new(config);
    let results = match session.run(&mut ConsoleReporter) {
        Ok(results) => results,
        Err(e) => {
            error!("Benchmark aborted: {}", e);
            return Err(e).context("Benchmark session failed, no results written");
        }
    };

    info!("{} configurations measured", results.len());
    Ok(())
}
