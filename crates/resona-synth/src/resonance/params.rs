//! Learnable resonance trajectories and their initialization.

use candle_core::{DType, Device, Tensor, Var};
use rand_pcg::Pcg32;

use crate::config::{ResonanceConfig, INITIAL_GAIN_RANGE};
use crate::error::SynthResult;
use crate::rng::{self, FREQUENCY_STREAM, GAIN_STREAM};

use super::input::FrameShape;

/// Frequency and gain trajectories for one `(batch, time)` shape.
///
/// Both variables are `[batch, n_resonances, time]` and trainable.
#[derive(Debug, Clone)]
pub struct ResonanceParams {
    frequencies: Var,
    gains: Var,
}

impl ResonanceParams {
    /// Wraps existing trajectories.
    pub fn from_vars(frequencies: Var, gains: Var) -> Self {
        Self { frequencies, gains }
    }

    /// Resonance frequencies in Hz.
    pub fn frequencies(&self) -> &Var {
        &self.frequencies
    }

    /// Resonance gains.
    pub fn gains(&self) -> &Var {
        &self.gains
    }

    /// Number of resonance components.
    pub fn n_resonances(&self) -> usize {
        self.frequencies.dims().get(1).copied().unwrap_or(0)
    }

    /// The `(batch, time)` shape these parameters were drawn for.
    pub fn frame_shape(&self) -> FrameShape {
        let dims = self.frequencies.dims();
        FrameShape::new(dims[0], dims[2])
    }

    /// Device the parameters live on.
    pub fn device(&self) -> &Device {
        self.frequencies.device()
    }

    /// Dtype of the parameters.
    pub fn dtype(&self) -> DType {
        self.frequencies.dtype()
    }

    /// Returns true if the parameters can be combined with a tensor on
    /// `device` in `dtype` without conversion.
    pub fn matches(&self, device: &Device, dtype: DType) -> bool {
        self.device().same_device(device) && self.dtype() == dtype
    }

    /// Both variables, frequencies first.
    pub fn vars(&self) -> [Var; 2] {
        [self.frequencies.clone(), self.gains.clone()]
    }
}

/// Draws fresh [`ResonanceParams`] from the configured ranges.
#[derive(Debug, Clone)]
pub struct ResonanceInit {
    n_resonances: usize,
    freq_low: f32,
    freq_high: f32,
    freq_rng: Pcg32,
    gain_rng: Pcg32,
}

impl ResonanceInit {
    /// Creates an initializer seeded from `config.seed`, or from OS entropy
    /// when unset.
    pub fn new(config: &ResonanceConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rng::entropy_seed);
        let (low, high) = config.freq_range;
        Self {
            n_resonances: config.n_resonances,
            freq_low: low as f32,
            freq_high: high as f32,
            freq_rng: rng::create_stream_rng(seed, FREQUENCY_STREAM),
            gain_rng: rng::create_stream_rng(seed, GAIN_STREAM),
        }
    }

    /// Draws frequencies from `[low, high)` and gains from `[0, 0.1)` for
    /// `shape`, as trainable variables on `device`.
    pub fn draw(
        &mut self,
        shape: FrameShape,
        device: &Device,
        dtype: DType,
    ) -> SynthResult<ResonanceParams> {
        let dims = (shape.batch, self.n_resonances, shape.time);
        let len = shape.batch * self.n_resonances * shape.time;

        let freqs = rng::uniform_vec(&mut self.freq_rng, len, self.freq_low, self.freq_high);
        let (gain_low, gain_high) = INITIAL_GAIN_RANGE;
        let gains = rng::uniform_vec(&mut self.gain_rng, len, gain_low, gain_high);

        let frequencies = Tensor::from_vec(freqs, dims, device)?.to_dtype(dtype)?;
        let gains = Tensor::from_vec(gains, dims, device)?.to_dtype(dtype)?;

        Ok(ResonanceParams {
            frequencies: Var::from_tensor(&frequencies)?,
            gains: Var::from_tensor(&gains)?,
        })
    }
}
