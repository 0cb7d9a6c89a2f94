//! scaling_bench - worker pool vs task executor scaling benchmark
//!
//! Runs a fixed grayscale/blur/edge/sharpen/brightness pipeline over a
//! directory of images under two parallel dispatch idioms at increasing
//! worker counts, and reports speedup and efficiency against each idiom's
//! own 1-worker baseline.

pub mod batch;
pub mod config;
mod error;
pub mod filters;
pub mod metrics;
pub mod pipeline;
pub mod pool;
pub mod report;
pub mod runner;
pub mod session;
pub mod tasks;

pub use batch::InputBatch;
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use metrics::{Baselines, ResultSet, RunResult, Timer};
pub use pipeline::{ImagePipeline, Outcome, PipelineConfig, Workload};
pub use pool::WorkerPoolRunner;
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use runner::{BatchRunner, OutcomeTally, Paradigm};
pub use session::Session;
pub use tasks::TaskExecutorRunner;
