//! Input batch discovery

use crate::error::{BenchError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default accepted image suffixes (matched case-insensitively)
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Fixed, immutable set of inputs shared by every configuration of a session
#[derive(Debug, Clone)]
pub struct InputBatch {
    paths: Arc<[PathBuf]>,
}

impl InputBatch {
    /// Collect every accepted image file directly under `dir`, sorted by path.
    ///
    /// Sub-directories are not descended into. An empty result is an error:
    /// there is nothing to benchmark over zero inputs.
    pub fn load(dir: impl AsRef<Path>, extensions: &[String]) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_accepted_extension(&path, extensions) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(BenchError::EmptyBatch(dir.to_path_buf()));
        }

        paths.sort();
        Ok(Self::from_paths(paths))
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into(),
        }
    }

    /// First `limit` inputs (or all of them when the batch is shorter)
    pub fn prefix(&self, limit: usize) -> Self {
        let end = limit.min(self.paths.len());
        Self::from_paths(self.paths[..end].to_vec())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Shared handle for runners that move paths into worker tasks
    pub fn shared(&self) -> Arc<[PathBuf]> {
        Arc::clone(&self.paths)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn has_accepted_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|accepted| accepted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "a.PNG", "c.JPEG", "notes.txt", "noext"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let batch = InputBatch::load(dir.path(), &default_extensions()).unwrap();
        let names: Vec<_> = batch
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.jpg", "c.JPEG"]);
    }

    #[test]
    fn test_empty_directory_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();

        let err = InputBatch::load(dir.path(), &default_extensions()).unwrap_err();
        assert!(matches!(err, BenchError::EmptyBatch(_)));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = InputBatch::load(dir.path().join("gone"), &default_extensions()).unwrap_err();
        assert!(matches!(err, BenchError::Io(_)));
    }

    #[test]
    fn test_prefix_caps_at_batch_len() {
        let batch = InputBatch::from_paths((0..5).map(|i| PathBuf::from(format!("{i}.jpg"))).collect());
        assert_eq!(batch.prefix(3).len(), 3);
        assert_eq!(batch.prefix(100).len(), 5);
        assert_eq!(batch.prefix(3).paths()[0], PathBuf::from("0.jpg"));
    }
}
