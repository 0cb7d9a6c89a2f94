//! Console table and CSV result file

use crate::config::BenchConfig;
use crate::error::Result;
use crate::metrics::{ResultSet, RunResult};
use std::fmt::Write;
use std::path::Path;

pub const CSV_HEADER: &str = "Paradigm,Cores,Time(s),Speedup,Efficiency";

const RULE_WIDTH: usize = 75;

/// Receives session progress as it happens.
///
/// Rows arrive one at a time, right after each configuration finishes.
pub trait Reporter {
    fn session_started(&mut self, _inputs: usize) {}
    fn warmup_started(&mut self, _inputs: usize) {}
    fn warmup_finished(&mut self) {}
    fn sweep_started(&mut self, _config: &BenchConfig) {}
    fn run_finished(&mut self, _result: &RunResult) {}
    fn session_finished(&mut self, _results_file: &Path) {}
}

/// Reporter that prints nothing
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Human-readable streaming table on stdout
#[derive(Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn session_started(&mut self, inputs: usize) {
        println!("--- Starting Benchmark on {} Images ---", inputs);
    }

    fn warmup_started(&mut self, inputs: usize) {
        println!(">>> Warming up ({} images on 1 worker, untimed)...", inputs);
    }

    fn warmup_finished(&mut self) {
        println!(">>> Warm-up complete. Starting timed runs.");
        println!("{}", rule());
    }

    fn sweep_started(&mut self, config: &BenchConfig) {
        println!("Testing Worker Counts: {:?}", config.worker_counts);
        match &config.output_dir {
            Some(dir) => println!("Note: processed images are saved in '{}'", dir.display()),
            None => println!("Note: processed images are not saved"),
        }
        println!("{}", rule());
        println!("{}", table_header());
        println!("{}", rule());
    }

    fn run_finished(&mut self, result: &RunResult) {
        println!("{}", format_row(result));
    }

    fn session_finished(&mut self, results_file: &Path) {
        println!("{}", rule());
        println!("Benchmark Complete. Data saved to '{}'.", results_file.display());
    }
}

pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn table_header() -> String {
    format!(
        "{:<20} | {:<5} | {:<8} | {:<8} | {:<10}",
        "Paradigm", "Cores", "Time(s)", "Speedup", "Efficiency"
    )
}

pub fn format_row(result: &RunResult) -> String {
    format!(
        "{:<20} | {:<5} | {:<8.4} | {:<8.2} | {:<10.2}",
        result.paradigm.label(),
        result.workers,
        result.duration_secs,
        result.speedup,
        result.efficiency
    )
}

/// Render the whole result set as CSV (header + one row per configuration)
pub fn render_csv(results: &ResultSet) -> String {
    let mut csv = String::new();
    writeln!(csv, "{}", CSV_HEADER).ok();
    for r in results.results() {
        writeln!(
            csv,
            "{},{},{:.4},{:.2},{:.2}",
            r.paradigm.label(),
            r.workers,
            r.duration_secs,
            r.speedup,
            r.efficiency
        )
        .ok();
    }
    csv
}

/// Write the result file, replacing any previous one
pub fn write_csv(path: &Path, results: &ResultSet) -> Result<()> {
    std::fs::write(path, render_csv(results))?;
    Ok(())
}
