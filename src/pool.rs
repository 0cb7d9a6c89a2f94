//! Fixed worker pool strategy (parallel map over a local rayon pool)

use crate::batch::InputBatch;
use crate::error::{BenchError, Result};
use crate::pipeline::{Outcome, Workload};
use crate::runner::BatchRunner;
use rayon::prelude::*;
use std::sync::Arc;

pub struct WorkerPoolRunner;

impl BatchRunner for WorkerPoolRunner {
    fn run(&self, batch: &InputBatch, workers: usize, workload: &Arc<dyn Workload>) -> Result<Vec<Outcome>> {
        if workers == 0 {
            return Err(BenchError::InvalidConfig("worker count must be at least 1".to_string()));
        }

        // Local pool: build_global() only works once per process and the
        // workers must not outlive this configuration.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("bench-pool-{}", i))
            .build()
            .map_err(|e| BenchError::PoolBuild {
                workers,
                reason: e.to_string(),
            })?;

        tracing::debug!("Worker pool up: {} threads for {} inputs", workers, batch.len());

        let outcomes: Vec<Outcome> = pool.install(|| {
            batch
                .paths()
                .par_iter()
                .with_max_len(1)
                .map(|path| workload.process(path))
                .collect()
        });

        // Dropping the pool joins its threads
        drop(pool);
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Records every path it sees and which thread processed it
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<HashMap<PathBuf, usize>>,
        threads: Mutex<Vec<String>>,
    }

    impl Workload for Recorder {
        fn process(&self, input: &Path) -> Outcome {
            *self.seen.lock().unwrap().entry(input.to_path_buf()).or_insert(0) += 1;
            let name = std::thread::current().name().unwrap_or("").to_string();
            self.threads.lock().unwrap().push(name);
            if input.to_string_lossy().contains("bad") {
                Outcome::DecodeFailed
            } else {
                Outcome::Processed
            }
        }
    }

    fn batch_of(n: usize) -> InputBatch {
        InputBatch::from_paths((0..n).map(|i| PathBuf::from(format!("img_{i:03}.jpg"))).collect())
    }

    #[test]
    fn test_each_input_processed_once() {
        let recorder = Arc::new(Recorder::default());
        let workload: Arc<dyn Workload> = recorder.clone();

        let outcomes = WorkerPoolRunner.run(&batch_of(37), 4, &workload).unwrap();

        assert_eq!(outcomes.len(), 37);
        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 37);
        assert!(seen.values().all(|&count| count == 1));
    }

    #[test]
    fn test_runs_on_pool_threads() {
        let recorder = Arc::new(Recorder::default());
        let workload: Arc<dyn Workload> = recorder.clone();

        WorkerPoolRunner.run(&batch_of(10), 2, &workload).unwrap();

        let threads = recorder.threads.lock().unwrap();
        assert!(threads.iter().all(|name| name.starts_with("bench-pool-")));
    }

    #[test]
    fn test_more_workers_than_inputs() {
        let workload: Arc<dyn Workload> = Arc::new(Recorder::default());
        let outcomes = WorkerPoolRunner.run(&batch_of(1), 8, &workload).unwrap();
        assert_eq!(outcomes, vec![Outcome::Processed]);
    }

    #[test]
    fn test_outcomes_keep_batch_order() {
        let batch = InputBatch::from_paths(vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("bad.jpg"),
            PathBuf::from("c.jpg"),
        ]);
        let workload: Arc<dyn Workload> = Arc::new(Recorder::default());
        let outcomes = WorkerPoolRunner.run(&batch, 2, &workload).unwrap();
        assert_eq!(outcomes, vec![Outcome::Processed, Outcome::DecodeFailed, Outcome::Processed]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let workload: Arc<dyn Workload> = Arc::new(Recorder::default());
        let err = WorkerPoolRunner.run(&batch_of(3), 0, &workload).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig(_)));
    }
}
