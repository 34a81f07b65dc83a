//! Batch resampling of a dataset folder.
//!
//! Scans one directory (non-recursively) for `.wav` files. Files already at
//! the source rate are resampled to the target rate and written under the
//! same name to the output directory; files at any other rate are skipped.
//! A file that cannot be read stops the job unless `keep_going` is set.

mod types;

pub use types::{BatchReport, FileOutcome, FileStatus};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{ResampleError, ResampleResult};
use crate::resample::{resample, ResampleQuality};
use crate::wav::{read_wav, write_wav, AudioBuffer, OutputFormat};

/// Default folder scanned for input files.
pub const DEFAULT_INPUT_DIR: &str = "wav_dump2";

/// Default folder converted files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "wav_dump";

/// Default rate a file must have to be converted.
pub const DEFAULT_SOURCE_RATE: u32 = 44100;

/// Default rate of the converted files.
pub const DEFAULT_TARGET_RATE: u32 = 22050;

/// A configured batch conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub source_rate: u32,
    pub target_rate: u32,
    pub format: OutputFormat,
    pub quality: ResampleQuality,
    /// Record unreadable files as failures instead of aborting.
    pub keep_going: bool,
}

impl Default for ResampleJob {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl ResampleJob {
    /// Creates a job with the default rates and encoding.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            source_rate: DEFAULT_SOURCE_RATE,
            target_rate: DEFAULT_TARGET_RATE,
            format: OutputFormat::default(),
            quality: ResampleQuality::default(),
            keep_going: false,
        }
    }

    pub fn with_rates(mut self, source_rate: u32, target_rate: u32) -> Self {
        self.source_rate = source_rate;
        self.target_rate = target_rate;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_quality(mut self, quality: ResampleQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Runs the job.
    pub fn run(&self) -> ResampleResult<BatchReport> {
        self.run_with(|_| {})
    }

    /// Runs the job, calling `on_file` after each file is handled.
    pub fn run_with<F>(&self, mut on_file: F) -> ResampleResult<BatchReport>
    where
        F: FnMut(&FileOutcome),
    {
        for rate in [self.source_rate, self.target_rate] {
            if rate == 0 {
                return Err(ResampleError::InvalidSampleRate { rate });
            }
        }
        if !self.input_dir.is_dir() {
            return Err(ResampleError::MissingInputDir {
                path: self.input_dir.clone(),
            });
        }
        fs::create_dir_all(&self.output_dir)?;

        let mut outcomes = Vec::new();
        for path in list_wav_files(&self.input_dir)? {
            let status = match self.process_file(&path) {
                Ok(status) => status,
                Err(e) if self.keep_going => {
                    warn!("Failed: {}: {}", path.display(), e);
                    FileStatus::Failed {
                        error: e.to_string(),
                    }
                }
                Err(e) => return Err(e.in_file(path)),
            };
            let outcome = FileOutcome {
                path: path.display().to_string(),
                status,
            };
            on_file(&outcome);
            outcomes.push(outcome);
        }

        Ok(BatchReport::from_outcomes(
            self.input_dir.display().to_string(),
            self.output_dir.display().to_string(),
            self.source_rate,
            self.target_rate,
            outcomes,
        ))
    }

    fn process_file(&self, path: &Path) -> ResampleResult<FileStatus> {
        let audio = read_wav(path)?;
        if audio.sample_rate != self.source_rate {
            info!(
                "Skipped (not {} Hz): {}",
                self.source_rate,
                path.display()
            );
            return Ok(FileStatus::Skipped {
                sample_rate: audio.sample_rate,
            });
        }

        let samples = resample(
            &audio.samples,
            audio.sample_rate,
            self.target_rate,
            self.quality,
        )?;
        let converted = AudioBuffer::new(samples, self.target_rate);

        let output_path = path
            .file_name()
            .map(|name| self.output_dir.join(name))
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("no file name in {}", path.display()),
                )
            })?;
        write_wav(&output_path, &converted, self.format)?;
        info!("Saved: {}", output_path.display());

        Ok(FileStatus::Converted {
            output: output_path.display().to_string(),
            input_frames: audio.samples.len(),
            output_frames: converted.samples.len(),
        })
    }
}

/// Regular files directly inside `dir` whose name ends in `.wav`, sorted.
///
/// The suffix match is case-sensitive. An entry that cannot be read, such as
/// a dangling symlink, fails the listing.
pub fn list_wav_files(dir: &Path) -> ResampleResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_wav = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(".wav"))
            .unwrap_or(false);
        if is_wav {
            files.push(entry.into_path());
        }
    }

    // Sort for deterministic output
    files.sort();
    Ok(files)
}
