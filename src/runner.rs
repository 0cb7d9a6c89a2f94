//! Common interface for the two parallel dispatch strategies

use crate::batch::InputBatch;
use crate::error::Result;
use crate::pipeline::{Outcome, Workload};
use crate::pool::WorkerPoolRunner;
use crate::tasks::TaskExecutorRunner;
use std::fmt;
use std::sync::Arc;

/// Runs a whole batch across a fixed number of workers.
///
/// Implementations build their workers inside `run` and tear them down before
/// returning, so nothing carries over from one configuration to the next.
/// Every input is processed exactly once; outcomes come back in batch order.
pub trait BatchRunner {
    fn run(&self, batch: &InputBatch, workers: usize, workload: &Arc<dyn Workload>) -> Result<Vec<Outcome>>;
}

/// Parallel dispatch idiom under benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Paradigm {
    /// Parallel map over a fixed pool of worker threads
    Pool,
    /// One submitted task per input, collected through join handles
    TaskExecutor,
}

impl Paradigm {
    pub const ALL: [Paradigm; 2] = [Paradigm::Pool, Paradigm::TaskExecutor];

    /// Label used in the console table and the result file
    pub fn label(&self) -> &'static str {
        match self {
            Paradigm::Pool => "WorkerPool",
            Paradigm::TaskExecutor => "TaskExecutor",
        }
    }

    pub fn runner(&self) -> Box<dyn BatchRunner> {
        match self {
            Paradigm::Pool => Box::new(WorkerPoolRunner),
            Paradigm::TaskExecutor => Box::new(TaskExecutorRunner),
        }
    }

    /// Parse a CLI name; accepts the label or a short alias
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pool" | "workerpool" | "worker-pool" => Some(Paradigm::Pool),
            "tasks" | "task" | "taskexecutor" | "task-executor" => Some(Paradigm::TaskExecutor),
            _ => None,
        }
    }
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-run outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub processed: usize,
    pub decode_failed: usize,
    pub processing_failed: usize,
}

impl OutcomeTally {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut tally, outcome| {
            match outcome {
                Outcome::Processed => tally.processed += 1,
                Outcome::DecodeFailed => tally.decode_failed += 1,
                Outcome::ProcessingFailed => tally.processing_failed += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.processed + self.decode_failed + self.processing_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paradigm_parse() {
        assert_eq!(Paradigm::parse("pool"), Some(Paradigm::Pool));
        assert_eq!(Paradigm::parse("WorkerPool"), Some(Paradigm::Pool));
        assert_eq!(Paradigm::parse("Tasks"), Some(Paradigm::TaskExecutor));
        assert_eq!(Paradigm::parse("task-executor"), Some(Paradigm::TaskExecutor));
        assert_eq!(Paradigm::parse("threads"), None);
    }

    #[test]
    fn test_paradigm_labels_round_trip() {
        for paradigm in Paradigm::ALL {
            assert_eq!(Paradigm::parse(paradigm.label()), Some(paradigm));
        }
    }

    #[test]
    fn test_tally() {
        let tally = OutcomeTally::from_outcomes(&[
            Outcome::Processed,
            Outcome::DecodeFailed,
            Outcome::Processed,
            Outcome::ProcessingFailed,
        ]);
        assert_eq!(tally.processed, 2);
        assert_eq!(tally.decode_failed, 1);
        assert_eq!(tally.processing_failed, 1);
        assert_eq!(tally.total(), 4);
    }
}
