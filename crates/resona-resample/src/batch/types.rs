//! Report types for the batch resampling job.

use serde::{Deserialize, Serialize};

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Resampled and written.
    Converted {
        /// Path of the written file
        output: String,
        /// Frames read
        input_frames: usize,
        /// Frames written
        output_frames: usize,
    },
    /// Left alone because it was not at the source rate.
    Skipped {
        /// Sample rate found in the file
        sample_rate: u32,
    },
    /// Could not be processed (only recorded when the job keeps going).
    Failed {
        /// Error message
        error: String,
    },
}

/// Outcome for a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path of the input file
    pub path: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self.status, FileStatus::Converted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, FileStatus::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }
}

/// Summary of a whole batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Directory that was scanned
    pub input_dir: String,
    /// Directory converted files were written to
    pub output_dir: String,
    /// Rate a file must have to be converted
    pub source_rate: u32,
    /// Rate of the written files
    pub target_rate: u32,
    /// Per-file outcomes in processing order
    pub files: Vec<FileOutcome>,
    /// Number of converted files
    pub converted: usize,
    /// Number of skipped files
    pub skipped: usize,
    /// Number of failed files
    pub failed: usize,
}

impl BatchReport {
    /// Builds a report and its counts from per-file outcomes.
    pub fn from_outcomes(
        input_dir: String,
        output_dir: String,
        source_rate: u32,
        target_rate: u32,
        files: Vec<FileOutcome>,
    ) -> Self {
        let converted = files.iter().filter(|f| f.is_converted()).count();
        let skipped = files.iter().filter(|f| f.is_skipped()).count();
        let failed = files.iter().filter(|f| f.is_failed()).count();
        Self {
            input_dir,
            output_dir,
            source_rate,
            target_rate,
            files,
            converted,
            skipped,
            failed,
        }
    }

    /// True if no file failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
