//! Task executor strategy
//!
//! Each input becomes one submitted blocking task on a fresh tokio runtime
//! whose blocking pool is capped at the configured worker count. The batch
//! completes once every join handle has resolved.

use crate::batch::InputBatch;
use crate::error::{BenchError, Result};
use crate::pipeline::{Outcome, Workload};
use crate::runner::BatchRunner;
use std::sync::Arc;
use tokio::runtime::Builder;
use tokio::task::JoinHandle;

pub struct TaskExecutorRunner;

impl BatchRunner for TaskExecutorRunner {
    fn run(&self, batch: &InputBatch, workers: usize, workload: &Arc<dyn Workload>) -> Result<Vec<Outcome>> {
        if workers == 0 {
            return Err(BenchError::InvalidConfig("worker count must be at least 1".to_string()));
        }

        // One scheduler thread to drive the join handles; the CPU work
        // runs on exactly `workers` blocking threads.
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name("bench-task")
            .build()
            .map_err(|source| BenchError::RuntimeBuild { workers, source })?;

        tracing::debug!("Task executor up: {} workers for {} inputs", workers, batch.len());

        let paths = batch.shared();
        let handles: Vec<JoinHandle<Outcome>> = (0..paths.len())
            .map(|index| {
                let paths = Arc::clone(&paths);
                let workload = Arc::clone(workload);
                runtime.spawn_blocking(move || workload.process(&paths[index]))
            })
            .collect();

        let outcomes = runtime.block_on(async move {
            let mut outcomes = Vec::with_capacity(handles.len());
            for handle in handles {
                let outcome = handle.await.map_err(|e| BenchError::TaskJoin(e.to_string()))?;
                outcomes.push(outcome);
            }
            Ok::<_, BenchError>(outcomes)
        })?;

        // Every task has resolved, so dropping the runtime only joins idle threads
        drop(runtime);
        Ok(outcomes)
    }
}
