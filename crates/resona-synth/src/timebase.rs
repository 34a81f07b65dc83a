//! Normalized time axis.

use candle_core::{DType, Device, Tensor};

use crate::error::SynthResult;

/// Returns `len` values evenly spaced over `[0, 1]`, endpoints included.
///
/// A single step yields `[0.0]`; zero steps yield an empty vector.
pub fn unit_ramp_values(len: usize) -> Vec<f32> {
    unit_ramp_values_f64(len).into_iter().map(|v| v as f32).collect()
}

/// Double precision form of [`unit_ramp_values`].
pub fn unit_ramp_values_f64(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (len - 1) as f64;
            (0..len).map(|i| i as f64 / last).collect()
        }
    }
}

/// Builds the `[len]` unit ramp on `device` in `dtype`.
///
/// F64 ramps are computed in double precision; every other float dtype is
/// cast from the f32 ramp.
pub fn unit_ramp(len: usize, device: &Device, dtype: DType) -> SynthResult<Tensor> {
    if dtype == DType::F64 {
        return Ok(Tensor::from_vec(unit_ramp_values_f64(len), len, device)?);
    }
    let ramp = Tensor::from_vec(unit_ramp_values(len), len, device)?;
    Ok(ramp.to_dtype(dtype)?)
}
