//! Error types for preprocessing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for preprocessing operations.
pub type ResampleResult<T> = Result<T, ResampleError>;

/// Errors that can occur while reading, converting or writing audio.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// Sample rate of zero (or otherwise unusable).
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// WAV decoding or encoding failure.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Sample rate converter failure.
    #[error("resampler error: {message}")]
    Resampler {
        /// Error message.
        message: String,
    },

    /// Input directory does not exist or is not a directory.
    #[error("input directory not found: {}", path.display())]
    MissingInputDir {
        /// The missing path.
        path: PathBuf,
    },

    /// A single file of a batch failed.
    #[error("failed to process {}: {source}", path.display())]
    File {
        /// File being processed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<ResampleError>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResampleError {
    /// Creates a resampler error.
    pub fn resampler(message: impl Into<String>) -> Self {
        Self::Resampler {
            message: message.into(),
        }
    }

    /// Wraps `self` with the path of the file it came from.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ResampleError::InvalidSampleRate { .. } => "RESAMPLE_001",
            ResampleError::Wav(_) => "RESAMPLE_002",
            ResampleError::Resampler { .. } => "RESAMPLE_003",
            ResampleError::MissingInputDir { .. } => "RESAMPLE_004",
            ResampleError::File { source, .. } => source.code(),
            ResampleError::Io(_) => "RESAMPLE_005",
        }
    }
}
