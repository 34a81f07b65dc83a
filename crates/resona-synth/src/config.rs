//! Synthesizer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Range of the initial gain draw. Gains start small so the base sinusoid
/// dominates until training moves them.
pub const INITIAL_GAIN_RANGE: (f32, f32) = (0.0, 0.1);

/// Default number of resonance components.
pub const DEFAULT_N_RESONANCES: usize = 3;

/// Default initial frequency range in Hz.
pub const DEFAULT_FREQ_RANGE: (f64, f64) = (500.0, 2000.0);

/// Default number of shapes kept by [`ShapePolicy::Retain`].
pub const DEFAULT_RETAIN_CAPACITY: usize = 4;

/// What happens to learned parameters when the F0 shape changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ShapePolicy {
    /// Keep a single parameter set; any shape change discards it and draws
    /// a fresh one.
    Replace,
    /// Keep up to `capacity` parameter sets keyed by `(batch, time)`,
    /// evicting the least recently used.
    Retain {
        /// Maximum number of shapes kept alive.
        capacity: usize,
    },
}

impl ShapePolicy {
    /// Number of parameter sets this policy keeps alive.
    pub fn capacity(&self) -> usize {
        match self {
            ShapePolicy::Replace => 1,
            ShapePolicy::Retain { capacity } => *capacity,
        }
    }
}

impl Default for ShapePolicy {
    fn default() -> Self {
        ShapePolicy::Retain {
            capacity: DEFAULT_RETAIN_CAPACITY,
        }
    }
}

/// Construction-time configuration of [`crate::AdaptiveResonance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResonanceConfig {
    /// Number of extra resonance components (0 disables them).
    pub n_resonances: usize,
    /// Bounds `[low, high)` of the initial frequency draw, in Hz.
    pub freq_range: (f64, f64),
    /// Base seed for parameter draws. `None` seeds from OS entropy.
    pub seed: Option<u32>,
    /// Retention policy for parameters across shape changes.
    pub shape_policy: ShapePolicy,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self {
            n_resonances: DEFAULT_N_RESONANCES,
            freq_range: DEFAULT_FREQ_RANGE,
            seed: None,
            shape_policy: ShapePolicy::default(),
        }
    }
}

impl ResonanceConfig {
    /// Creates a config with the given resonance count and defaults elsewhere.
    pub fn new(n_resonances: usize) -> Self {
        Self {
            n_resonances,
            ..Self::default()
        }
    }

    /// Sets the initial frequency range.
    pub fn with_freq_range(mut self, low: f64, high: f64) -> Self {
        self.freq_range = (low, high);
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the shape policy.
    pub fn with_shape_policy(mut self, policy: ShapePolicy) -> Self {
        self.shape_policy = policy;
        self
    }

    /// Parses a config from a JSON file.
    pub fn from_file(path: &Path) -> SynthResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json(json: &str) -> SynthResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config can drive parameter initialization.
    pub fn validate(&self) -> SynthResult<()> {
        let (low, high) = self.freq_range;
        if !low.is_finite() || !high.is_finite() {
            return Err(SynthError::invalid_config(
                "freq_range",
                format!("bounds must be finite, got ({}, {})", low, high),
            ));
        }
        if low < 0.0 {
            return Err(SynthError::invalid_config(
                "freq_range",
                format!("low bound must be non-negative, got {}", low),
            ));
        }
        if low >= high {
            return Err(SynthError::invalid_config(
                "freq_range",
                format!("low bound {} must be below high bound {}", low, high),
            ));
        }
        let (low32, high32) = (low as f32, high as f32);
        if !high32.is_finite() || !(high32 - low32).is_finite() {
            return Err(SynthError::invalid_config(
                "freq_range",
                format!("bounds ({}, {}) overflow f32", low, high),
            ));
        }
        if low32 >= high32 {
            return Err(SynthError::invalid_config(
                "freq_range",
                format!("bounds ({}, {}) collapse at f32 precision", low, high),
            ));
        }
        if self.shape_policy.capacity() == 0 {
            return Err(SynthError::invalid_config(
                "shape_policy",
                "retain capacity must be at least 1",
            ));
        }
        Ok(())
    }
}
