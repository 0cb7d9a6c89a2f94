//! Per-image unit of work
//!
//! Decodes one input and runs the fixed filter chain over it:
//! grayscale -> gaussian blur -> sobel edges -> sharpen -> brightness.
//! Failures never escape `process`; they come back as an [`Outcome`].

use crate::filters;
use image::GrayImage;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// File name prefix for processed artifacts
pub const OUTPUT_PREFIX: &str = "proc_";

/// Brightness offset applied in the last stage
pub const DEFAULT_BRIGHTNESS: u8 = 30;

/// Result kind for one processed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every stage ran (and the artifact was written, if enabled)
    Processed,
    /// Input could not be read or decoded
    DecodeFailed,
    /// A later stage or the artifact write failed
    ProcessingFailed,
}

impl Outcome {
    /// Integer success flag: 1 when processed, 0 otherwise
    pub fn as_flag(self) -> u8 {
        match self {
            Outcome::Processed => 1,
            Outcome::DecodeFailed | Outcome::ProcessingFailed => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Processed
    }
}

/// A unit of work the batch runners can fan out across workers
pub trait Workload: Send + Sync {
    fn process(&self, input: &Path) -> Outcome;
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Where `proc_<name>` artifacts go; `None` skips writing them
    pub output_dir: Option<PathBuf>,
    pub brightness: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

pub struct ImagePipeline {
    config: PipelineConfig,
}

impl ImagePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Artifact path for an input, derived from its file name only
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        let dir = self.config.output_dir.as_ref()?;
        let name = input.file_name()?;
        Some(dir.join(format!("{}{}", OUTPUT_PREFIX, name.to_string_lossy())))
    }

    fn run_stages(&self, input: &Path) -> Outcome {
        let decoded = match image::open(input) {
            Ok(img) => img,
            Err(_) => return Outcome::DecodeFailed,
        };

        let gray = decoded.to_luma8();
        let (w, h) = gray.dimensions();
        if w == 0 || h == 0 {
            return Outcome::ProcessingFailed;
        }
        let (width, height) = (w as usize, h as usize);

        let smoothed = filters::gaussian_blur_3x3(gray.as_raw(), width, height);

        // Edge map is part of the workload but never persisted
        let edges = filters::sobel_magnitude(&smoothed, width, height);
        std::hint::black_box(&edges);

        let sharpened = filters::sharpen_3x3(&smoothed, width, height);
        let brightened = filters::brighten(&sharpened, self.config.brightness);

        if self.config.output_dir.is_none() {
            return Outcome::Processed;
        }
        let Some(save_path) = self.output_path(input) else {
            return Outcome::ProcessingFailed;
        };
        let Some(result) = GrayImage::from_raw(w, h, brightened) else {
            return Outcome::ProcessingFailed;
        };

        match result.save(&save_path) {
            Ok(()) => Outcome::Processed,
            Err(_) => Outcome::ProcessingFailed,
        }
    }
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Workload for ImagePipeline {
    fn process(&self, input: &Path) -> Outcome {
        // A panicking filter must not take the worker down with it
        panic::catch_unwind(AssertUnwindSafe(|| self.run_stages(input)))
            .unwrap_or(Outcome::ProcessingFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use tempfile::TempDir;

    fn write_flat_png(dir: &Path, name: &str, value: u8) -> PathBuf {
        let path = dir.join(name);
        GrayImage::from_pixel(16, 12, Luma([value])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_outcome_flags() {
        assert_eq!(Outcome::Processed.as_flag(), 1);
        assert_eq!(Outcome::DecodeFailed.as_flag(), 0);
        assert_eq!(Outcome::ProcessingFailed.as_flag(), 0);
        assert!(Outcome::Processed.is_success());
        assert!(!Outcome::DecodeFailed.is_success());
    }

    #[test]
    fn test_output_path_uses_prefix() {
        let pipeline = ImagePipeline::new(PipelineConfig {
            output_dir: Some(PathBuf::from("/tmp/out")),
            brightness: DEFAULT_BRIGHTNESS,
        });
        assert_eq!(
            pipeline.output_path(Path::new("/data/pizza_001.jpg")),
            Some(PathBuf::from("/tmp/out/proc_pizza_001.jpg"))
        );
        assert_eq!(ImagePipeline::default().output_path(Path::new("/data/a.jpg")), None);
    }

    #[test]
    fn test_process_writes_brightened_artifact() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let input = write_flat_png(input_dir.path(), "flat.png", 100);

        let pipeline = ImagePipeline::new(PipelineConfig {
            output_dir: Some(output_dir.path().to_path_buf()),
            brightness: 30,
        });
        assert_eq!(pipeline.process(&input), Outcome::Processed);

        let artifact = output_dir.path().join("proc_flat.png");
        let written = image::open(&artifact).unwrap().to_luma8();
        assert_eq!(written.dimensions(), (16, 12));
        assert!(written.pixels().all(|p| p.0[0] == 130));
    }

    #[test]
    fn test_brightness_saturates_in_output() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let input = write_flat_png(input_dir.path(), "bright.png", 240);

        let pipeline = ImagePipeline::new(PipelineConfig {
            output_dir: Some(output_dir.path().to_path_buf()),
            brightness: 30,
        });
        assert_eq!(pipeline.process(&input), Outcome::Processed);

        let written = image::open(output_dir.path().join("proc_bright.png")).unwrap().to_luma8();
        assert!(written.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_process_without_output_dir_writes_nothing() {
        let input_dir = TempDir::new().unwrap();
        let input = write_flat_png(input_dir.path(), "flat.png", 10);

        assert_eq!(ImagePipeline::default().process(&input), Outcome::Processed);
        let entries = std::fs::read_dir(input_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_corrupt_input_is_decode_failure() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("broken.jpg");
        std::fs::write(&bad, b"definitely not a jpeg").unwrap();

        assert_eq!(ImagePipeline::default().process(&bad), Outcome::DecodeFailed);
        assert_eq!(
            ImagePipeline::default().process(&dir.path().join("missing.png")),
            Outcome::DecodeFailed
        );
    }

    #[test]
    fn test_unwritable_output_is_processing_failure() {
        let input_dir = TempDir::new().unwrap();
        let input = write_flat_png(input_dir.path(), "flat.png", 50);

        let pipeline = ImagePipeline::new(PipelineConfig {
            output_dir: Some(input_dir.path().join("does/not/exist")),
            brightness: 30,
        });
        assert_eq!(pipeline.process(&input), Outcome::ProcessingFailed);
    }
}
