//! Error types for the resonance synthesizer.

use thiserror::Error;

/// Result type for synthesizer operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while configuring or running the synthesizer.
#[derive(Debug, Error)]
pub enum SynthError {
    /// F0 input has a rank other than 2 or 3.
    #[error("invalid F0 input rank {rank}: expected [batch, time] or [batch, time, 1], got shape {dims:?}")]
    InvalidInputRank {
        /// Rank of the offending tensor.
        rank: usize,
        /// Full shape of the offending tensor.
        dims: Vec<usize>,
    },

    /// Rank-3 F0 input whose trailing dimension is not 1.
    #[error("invalid F0 trailing dimension {size}: only a trailing dimension of 1 can be squeezed (shape {dims:?})")]
    InvalidTrailingDim {
        /// Size of the trailing dimension.
        size: usize,
        /// Full shape of the offending tensor.
        dims: Vec<usize>,
    },

    /// F0 input has no time steps.
    #[error("F0 input has an empty time axis")]
    EmptyTimeAxis,

    /// F0 input has no batch entries.
    #[error("F0 input has an empty batch")]
    EmptyBatch,

    /// F0 input is not a floating point tensor.
    #[error("unsupported F0 dtype {dtype}: expected a floating point tensor")]
    UnsupportedDType {
        /// Name of the offending dtype.
        dtype: String,
    },

    /// Invalid configuration value.
    #[error("invalid config '{field}': {message}")]
    InvalidConfig {
        /// Config field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// The attached parameter registry could not be updated.
    #[error("parameter registry error: {message}")]
    Registry {
        /// Error message.
        message: String,
    },

    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tensor operation or allocation failure.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),
}

impl SynthError {
    /// Creates an invalid config error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a registry error.
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidInputRank { .. } => "SYNTH_001",
            SynthError::InvalidTrailingDim { .. } => "SYNTH_002",
            SynthError::EmptyTimeAxis => "SYNTH_003",
            SynthError::EmptyBatch => "SYNTH_004",
            SynthError::UnsupportedDType { .. } => "SYNTH_005",
            SynthError::InvalidConfig { .. } => "SYNTH_006",
            SynthError::Registry { .. } => "SYNTH_007",
            SynthError::Config(_) => "SYNTH_008",
            SynthError::Io(_) => "SYNTH_009",
            SynthError::Tensor(_) => "SYNTH_010",
        }
    }

    /// Returns true if the error was caused by a malformed F0 input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SynthError::InvalidInputRank { .. }
                | SynthError::InvalidTrailingDim { .. }
                | SynthError::EmptyTimeAxis
                | SynthError::EmptyBatch
                | SynthError::UnsupportedDType { .. }
        )
    }
}
