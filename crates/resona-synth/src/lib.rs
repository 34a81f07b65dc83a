//! Resona Resonance Synthesizer
//!
//! This crate implements the pitch-driven source module used in front of
//! an SVS vocoder. Given a frame-rate fundamental frequency track it
//! produces a base sinusoid at F0 plus a fixed number of resonance
//! sinusoids, each with its own learnable frequency and gain trajectory.
//!
//! # Overview
//!
//! Tensors, devices and autograd are provided by `candle-core`. The
//! resonance trajectories are [`candle_core::Var`]s, so the output is
//! differentiable with respect to them and any `candle-nn` optimizer can
//! train them alongside the enclosing model.
//!
//! Parameters are created lazily, the first time a `(batch, time)` shape is
//! seen. A [`ShapePolicy`] decides whether a shape change replaces them or
//! whether several shapes keep their learned values in an LRU cache.
//!
//! # Determinism
//!
//! Initialization is the only stochastic step. Draws use PCG32 with
//! independent streams for frequencies and gains; with a fixed
//! [`ResonanceConfig::seed`] two modules produce identical parameters and
//! identical output.
//!
//! # Example
//!
//! ```ignore
//! use candle_core::{Device, Tensor};
//! use resona_synth::{AdaptiveResonance, ResonanceConfig};
//!
//! let mut synth = AdaptiveResonance::new(ResonanceConfig::default().with_seed(42))?;
//! let f0 = Tensor::full(220f32, (1, 200), &Device::Cpu)?;
//! let signal = synth.synthesize(&f0)?; // [1, 1, 200]
//! ```
//!
//! # Crate Structure
//!
//! - [`resonance`] - The synthesizer, its parameters and shape cache
//! - [`config`] - Construction-time configuration
//! - [`timebase`] - Normalized time ramp
//! - [`rng`] - Seeded PCG32 streams
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod resonance;
pub mod rng;
pub mod timebase;

// Re-export main types at crate root
pub use config::{ResonanceConfig, ShapePolicy, INITIAL_GAIN_RANGE};
pub use error::{SynthError, SynthResult};
pub use resonance::{AdaptiveResonance, FrameShape, ResonanceParams};
