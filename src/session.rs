//! Benchmark session driver
//!
//! Runs the phases strictly in order, never overlapping two configurations:
//!
//! 1. load the input batch (fatal when empty)
//! 2. create the artifact directory
//! 3. untimed warm-up on the worker pool with one worker
//! 4. for each paradigm, for each worker count: pause, time the run, record
//! 5. write the result file
//!
//! Any error from a runner ends the session before the result file is
//! written; there are no retries.

use crate::batch::InputBatch;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::metrics::{Baselines, ResultSet, RunResult, Timer};
use crate::pipeline::{ImagePipeline, Workload};
use crate::report::{self, Reporter};
use crate::runner::{OutcomeTally, Paradigm};
use std::sync::Arc;
use tracing::{debug, info};

pub struct Session {
    config: BenchConfig,
    workload: Arc<dyn Workload>,
}

impl Session {
    /// Session over the image pipeline described by `config`
    pub fn new(config: BenchConfig) -> Self {
        let pipeline = ImagePipeline::new(config.pipeline_config());
        Self::with_workload(config, Arc::new(pipeline))
    }

    /// Session over an arbitrary unit of work
    pub fn with_workload(config: BenchConfig, workload: Arc<dyn Workload>) -> Self {
        Self { config, workload }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<ResultSet> {
        self.config.validate()?;

        let batch = InputBatch::load(&self.config.input_dir, &self.config.extensions)?;
        info!("Loaded {} inputs from {}", batch.len(), self.config.input_dir.display());
        reporter.session_started(batch.len());

        if let Some(dir) = &self.config.output_dir {
            std::fs::create_dir_all(dir)?;
        }

        self.warm_up(&batch, reporter)?;

        reporter.sweep_started(&self.config);
        let results = self.sweep(&batch, reporter)?;

        report::write_csv(&self.config.results_file, &results)?;
        info!("Wrote {} results to {}", results.len(), self.config.results_file.display());
        reporter.session_finished(&self.config.results_file);

        Ok(results)
    }

    fn warm_up(&self, batch: &InputBatch, reporter: &mut dyn Reporter) -> Result<()> {
        if self.config.warmup_limit == 0 {
            debug!("Warm-up disabled");
            return Ok(());
        }

        let subset = batch.prefix(self.config.warmup_limit);
        reporter.warmup_started(subset.len());
        info!("Warm-up over {} inputs", subset.len());

        Paradigm::Pool.runner().run(&subset, 1, &self.workload)?;

        reporter.warmup_finished();
        Ok(())
    }

    fn sweep(&self, batch: &InputBatch, reporter: &mut dyn Reporter) -> Result<ResultSet> {
        let mut baselines = Baselines::default();
        let mut results = ResultSet::new();

        for (paradigm, workers) in self.config.configurations() {
            if !self.config.pause.is_zero() {
                std::thread::sleep(self.config.pause);
            }

            let duration_secs = self.time_run(paradigm, batch, workers)?;
            let result = RunResult::record(&mut baselines, paradigm, workers, duration_secs)?;

            reporter.run_finished(&result);
            results.push(result);
        }

        Ok(results)
    }

    /// Wall-clock seconds for one configuration over the full batch
    fn time_run(&self, paradigm: Paradigm, batch: &InputBatch, workers: usize) -> Result<f64> {
        let runner = paradigm.runner();

        let timer = Timer::new();
        let outcomes = runner.run(batch, workers, &self.workload)?;
        let elapsed = timer.elapsed_secs();

        let tally = OutcomeTally::from_outcomes(&outcomes);
        debug!(
            "{} x{}: {:.4}s, {} processed, {} undecodable, {} failed",
            paradigm, workers, elapsed, tally.processed, tally.decode_failed, tally.processing_failed
        );

        Ok(elapsed)
    }
}
