//! F0 input validation.

use candle_core::Tensor;

use crate::error::{SynthError, SynthResult};

/// Batch and time dimensions of a validated F0 track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameShape {
    /// Number of tracks in the batch.
    pub batch: usize,
    /// Number of frames per track.
    pub time: usize,
}

impl FrameShape {
    /// Creates a frame shape.
    pub fn new(batch: usize, time: usize) -> Self {
        Self { batch, time }
    }
}

impl From<(usize, usize)> for FrameShape {
    fn from((batch, time): (usize, usize)) -> Self {
        Self::new(batch, time)
    }
}

/// Validates an F0 tensor and returns it as `[batch, time]`.
///
/// Accepts `[batch, time]` and `[batch, time, 1]`. Every other layout is
/// rejected before any computation happens.
pub fn prepare_f0(f0: &Tensor) -> SynthResult<(Tensor, FrameShape)> {
    let dtype = f0.dtype();
    if !dtype.is_float() {
        return Err(SynthError::UnsupportedDType {
            dtype: format!("{:?}", dtype),
        });
    }

    let dims = f0.dims().to_vec();
    let f0 = match dims.as_slice() {
        [_, _] => f0.clone(),
        [_, _, 1] => f0.squeeze(2)?,
        [_, _, size] => {
            return Err(SynthError::InvalidTrailingDim { size: *size, dims });
        }
        _ => {
            return Err(SynthError::InvalidInputRank {
                rank: dims.len(),
                dims,
            });
        }
    };

    let (batch, time) = f0.dims2()?;
    if batch == 0 {
        return Err(SynthError::EmptyBatch);
    }
    if time == 0 {
        return Err(SynthError::EmptyTimeAxis);
    }

    Ok((f0, FrameShape::new(batch, time)))
}
