use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("No input images found in {}", .0.display())]
    EmptyBatch(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool with {workers} threads: {reason}")]
    PoolBuild { workers: usize, reason: String },

    #[error("Failed to build task executor with {workers} workers: {source}")]
    RuntimeBuild {
        workers: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Task executor lost a task: {0}")]
    TaskJoin(String),

    #[error("No baseline recorded for {0}")]
    MissingBaseline(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
