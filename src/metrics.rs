//! Timing and scaling metrics

use crate::error::{BenchError, Result};
use crate::runner::Paradigm;
use std::time::Instant;

/// Baseline-relative speedup; a zero or non-finite duration yields 0.0
pub fn speedup(baseline_secs: f64, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 && duration_secs.is_finite() {
        baseline_secs / duration_secs
    } else {
        0.0
    }
}

/// Speedup per worker
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    if workers > 0 {
        speedup / workers as f64
    } else {
        0.0
    }
}

/// One-worker durations, one optional slot per paradigm
#[derive(Debug, Clone, Copy, Default)]
pub struct Baselines {
    pool: Option<f64>,
    task_executor: Option<f64>,
}

impl Baselines {
    pub fn get(&self, paradigm: Paradigm) -> Option<f64> {
        match paradigm {
            Paradigm::Pool => self.pool,
            Paradigm::TaskExecutor => self.task_executor,
        }
    }

    pub fn set(&mut self, paradigm: Paradigm, duration_secs: f64) {
        let slot = match paradigm {
            Paradigm::Pool => &mut self.pool,
            Paradigm::TaskExecutor => &mut self.task_executor,
        };
        *slot = Some(duration_secs);
    }
}

/// Measurement for a single (paradigm, worker-count) configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub paradigm: Paradigm,
    pub workers: usize,
    pub duration_secs: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

impl RunResult {
    /// Build a result, capturing the baseline first when `workers == 1`.
    ///
    /// The 1-worker row is 1.0/1.0 by construction. Any other worker count
    /// needs the paradigm's baseline to be recorded already.
    pub fn record(
        baselines: &mut Baselines,
        paradigm: Paradigm,
        workers: usize,
        duration_secs: f64,
    ) -> Result<Self> {
        if workers == 1 {
            baselines.set(paradigm, duration_secs);
            return Ok(Self {
                paradigm,
                workers,
                duration_secs,
                speedup: 1.0,
                efficiency: 1.0,
            });
        }

        let baseline = baselines
            .get(paradigm)
            .ok_or_else(|| BenchError::MissingBaseline(paradigm.label().to_string()))?;
        let speedup = speedup(baseline, duration_secs);

        Ok(Self {
            paradigm,
            workers,
            duration_secs,
            speedup,
            efficiency: efficiency(speedup, workers),
        })
    }
}

/// All results of one session, in sweep order
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<RunResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: RunResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    pub fn get(&self, paradigm: Paradigm, workers: usize) -> Option<&RunResult> {
        self.results
            .iter()
            .find(|r| r.paradigm == paradigm && r.workers == workers)
    }

    pub fn for_paradigm(&self, paradigm: Paradigm) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(move |r| r.paradigm == paradigm)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Wall-clock timer for a single run
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
