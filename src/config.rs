//! Session tunables

use crate::batch::DEFAULT_EXTENSIONS;
use crate::error::{BenchError, Result};
use crate::pipeline::{PipelineConfig, DEFAULT_BRIGHTNESS};
use crate::runner::Paradigm;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INPUT_DIR: &str = "dataset_subset";
pub const DEFAULT_OUTPUT_DIR: &str = "processed_images";
pub const DEFAULT_RESULTS_FILE: &str = "performance_results.csv";
pub const DEFAULT_WORKER_COUNTS: [usize; 4] = [1, 2, 4, 8];
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);
pub const DEFAULT_WARMUP_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub input_dir: PathBuf,
    /// Artifact directory; `None` disables writing processed images
    pub output_dir: Option<PathBuf>,
    pub results_file: PathBuf,
    /// Strictly ascending, starting at 1 (the baseline)
    pub worker_counts: Vec<usize>,
    pub paradigms: Vec<Paradigm>,
    /// Settle time before every timed run
    pub pause: Duration,
    /// Upper bound on warm-up inputs; 0 skips the warm-up
    pub warmup_limit: usize,
    pub brightness: u8,
    /// Accepted input suffixes, compared case-insensitively
    pub extensions: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: Some(PathBuf::from(DEFAULT_OUTPUT_DIR)),
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
            worker_counts: DEFAULT_WORKER_COUNTS.to_vec(),
            paradigms: Paradigm::ALL.to_vec(),
            pause: DEFAULT_PAUSE,
            warmup_limit: DEFAULT_WARMUP_LIMIT,
            brightness: DEFAULT_BRIGHTNESS,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BenchConfig {
    /// Reject sweeps that could not produce a baseline-relative table
    pub fn validate(&self) -> Result<()> {
        if self.paradigms.is_empty() {
            return Err(BenchError::InvalidConfig("no paradigms selected".to_string()));
        }
        for (i, paradigm) in self.paradigms.iter().enumerate() {
            if self.paradigms[..i].contains(paradigm) {
                return Err(BenchError::InvalidConfig(format!("paradigm {} listed twice", paradigm)));
            }
        }

        match self.worker_counts.first() {
            None => {
                return Err(BenchError::InvalidConfig("no worker counts given".to_string()));
            }
            Some(&first) if first != 1 => {
                return Err(BenchError::InvalidConfig(format!(
                    "worker counts must start at the 1-worker baseline, got {}",
                    first
                )));
            }
            Some(_) => {}
        }
        if let Some(pair) = self.worker_counts.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BenchError::InvalidConfig(format!(
                "worker counts must be strictly ascending ({} then {})",
                pair[0], pair[1]
            )));
        }

        if self.extensions.is_empty() {
            return Err(BenchError::InvalidConfig("no input extensions accepted".to_string()));
        }

        Ok(())
    }

    /// Every (paradigm, worker-count) pair in sweep order
    pub fn configurations(&self) -> Vec<(Paradigm, usize)> {
        self.paradigms
            .iter()
            .flat_map(|&paradigm| self.worker_counts.iter().map(move |&workers| (paradigm, workers)))
            .collect()
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            output_dir: self.output_dir.clone(),
            brightness: self.brightness,
        }
    }
}
