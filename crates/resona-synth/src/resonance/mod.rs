//! Adaptive learnable resonance source.
//!
//! [`AdaptiveResonance`] turns a frame-rate F0 track into a sinusoidal source
//! signal enriched with learnable resonances:
//!
//! ```text
//! t          = linspace(0, 1, T)
//! base       = sin(2π · f0 · t)
//! resonance  = Σₙ gains[:, n, :] · sin(2π · frequencies[:, n, :] · t)
//! output     = (base + resonance)[:, None, :]        [B, 1, T]
//! ```
//!
//! `frequencies` and `gains` are trainable [`Var`]s created lazily for each
//! `(batch, time)` shape the module sees. The [`ShapePolicy`] decides how
//! many shapes keep their learned values alive at once.

mod cache;
mod input;
mod params;


pub use cache::ShapeCache;
pub use input::{prepare_f0, FrameShape};
pub use params::{ResonanceInit, ResonanceParams};

use std::f64::consts::TAU;
use std::fmt;

use candle_core::{DType, Device, Tensor, Var};
use candle_nn::VarMap;
use tracing::debug;

use crate::config::{ResonanceConfig, ShapePolicy};
use crate::error::{SynthError, SynthResult};
use crate::timebase;

/// Registry name of the frequency trajectory for `shape`.
pub fn frequency_var_name(shape: FrameShape) -> String {
    format!("resonance.frequencies.b{}.t{}", shape.batch, shape.time)
}

/// Registry name of the gain trajectory for `shape`.
pub fn gain_var_name(shape: FrameShape) -> String {
    format!("resonance.gains.b{}.t{}", shape.batch, shape.time)
}

/// F0-driven sinusoidal source with learnable resonances.
///
/// `synthesize` takes `&mut self` because it may allocate parameters, so a
/// single instance never races on initialization. To share one across
/// threads, wrap it in a `Mutex`.
pub struct AdaptiveResonance {
    config: ResonanceConfig,
    init: ResonanceInit,
    cache: ShapeCache,
    var_map: Option<VarMap>,
}

impl AdaptiveResonance {
    /// Creates a module with no parameters yet.
    pub fn new(config: ResonanceConfig) -> SynthResult<Self> {
        config.validate()?;
        let init = ResonanceInit::new(&config);
        let cache = ShapeCache::new(config.shape_policy.capacity());
        Ok(Self {
            config,
            init,
            cache,
            var_map: None,
        })
    }

    /// Mirrors every live parameter set into `var_map`, the parameter set of
    /// the enclosing model.
    pub fn with_var_map(mut self, var_map: VarMap) -> SynthResult<Self> {
        self.var_map = Some(var_map);
        let live: Vec<_> = self.cache.iter().cloned().collect();
        for (shape, params) in &live {
            self.register(*shape, params)?;
        }
        Ok(self)
    }

    pub fn config(&self) -> &ResonanceConfig {
        &self.config
    }

    pub fn n_resonances(&self) -> usize {
        self.config.n_resonances
    }

    pub fn shape_policy(&self) -> ShapePolicy {
        self.config.shape_policy
    }

    /// Draws fresh parameters for `(batch, time)`.
    ///
    /// Learned values previously held for that shape are discarded. Under
    /// [`ShapePolicy::Replace`] every other shape is discarded as well.
    pub fn initialize(
        &mut self,
        batch: usize,
        time: usize,
        device: &Device,
        dtype: DType,
    ) -> SynthResult<ResonanceParams> {
        if batch == 0 {
            return Err(SynthError::EmptyBatch);
        }
        if time == 0 {
            return Err(SynthError::EmptyTimeAxis);
        }
        if !dtype.is_float() {
            return Err(SynthError::UnsupportedDType {
                dtype: format!("{:?}", dtype),
            });
        }

        let shape = FrameShape::new(batch, time);
        let params = self.init.draw(shape, device, dtype)?;
        let displaced = self.cache.insert(shape, params.clone());
        for (old_shape, _) in &displaced {
            self.unregister(*old_shape)?;
            debug!(
                batch = old_shape.batch,
                time = old_shape.time,
                "dropped resonance parameters"
            );
        }
        self.register(shape, &params)?;

        debug!(
            batch,
            time,
            n_resonances = self.config.n_resonances,
            cached = self.cache.len(),
            "initialized resonance parameters"
        );
        Ok(params)
    }

    /// Synthesizes the source signal for `f0`.
    ///
    /// `f0` is `[batch, time]` or `[batch, time, 1]`; the result is
    /// `[batch, 1, time]` on the same device and in the same dtype.
    pub fn synthesize(&mut self, f0: &Tensor) -> SynthResult<Tensor> {
        let (f0, shape) = prepare_f0(f0)?;
        let device = f0.device().clone();
        let dtype = f0.dtype();
        let params = self.resolve(shape, &device, dtype)?;

        let t = timebase::unit_ramp(shape.time, &device, dtype)?.unsqueeze(0)?;
        let base = f0.broadcast_mul(&t)?.affine(TAU, 0.0)?.sin()?;

        let signal = if params.n_resonances() == 0 {
            base
        } else {
            let t = t.unsqueeze(0)?;
            let partials = params
                .frequencies()
                .broadcast_mul(&t)?
                .affine(TAU, 0.0)?
                .sin()?;
            let resonance = params.gains().as_tensor().mul(&partials)?.sum(1)?;
            (base + resonance)?
        };

        Ok(signal.unsqueeze(1)?)
    }

    /// Parameters currently held for `(batch, time)`, if any.
    pub fn params(&self, batch: usize, time: usize) -> Option<&ResonanceParams> {
        self.cache.peek(FrameShape::new(batch, time))
    }

    /// Shapes with live parameters, most recently used first.
    pub fn cached_shapes(&self) -> Vec<FrameShape> {
        self.cache.shapes()
    }

    /// Every live trainable variable, ready to hand to an optimizer.
    pub fn trainable_vars(&self) -> Vec<Var> {
        self.cache
            .iter()
            .flat_map(|(_, params)| params.vars())
            .collect()
    }

    /// Drops every parameter set.
    pub fn reset(&mut self) -> SynthResult<()> {
        for (shape, _) in self.cache.drain() {
            self.unregister(shape)?;
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        shape: FrameShape,
        device: &Device,
        dtype: DType,
    ) -> SynthResult<ResonanceParams> {
        if let Some(params) = self.cache.touch(shape) {
            if params.matches(device, dtype) {
                return Ok(params.clone());
            }
        }
        self.initialize(shape.batch, shape.time, device, dtype)
    }

    fn register(&self, shape: FrameShape, params: &ResonanceParams) -> SynthResult<()> {
        let Some(var_map) = &self.var_map else {
            return Ok(());
        };
        let mut data = var_map
            .data()
            .lock()
            .map_err(|_| SynthError::registry("parameter registry lock poisoned"))?;
        data.insert(frequency_var_name(shape), params.frequencies().clone());
        data.insert(gain_var_name(shape), params.gains().clone());
        Ok(())
    }

    fn unregister(&self, shape: FrameShape) -> SynthResult<()> {
        let Some(var_map) = &self.var_map else {
            return Ok(());
        };
        let mut data = var_map
            .data()
            .lock()
            .map_err(|_| SynthError::registry("parameter registry lock poisoned"))?;
        data.remove(&frequency_var_name(shape));
        data.remove(&gain_var_name(shape));
        Ok(())
    }
}

impl fmt::Debug for AdaptiveResonance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveResonance")
            .field("config", &self.config)
            .field("cached_shapes", &self.cache.shapes())
            .field("registered", &self.var_map.is_some())
            .finish()
    }
}
