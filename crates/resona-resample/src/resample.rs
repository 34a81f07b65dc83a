//! Sample rate conversion using rubato's windowed-sinc resampler.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use serde::{Deserialize, Serialize};

use crate::error::{ResampleError, ResampleResult};

/// Frames fed to the resampler per call.
const CHUNK_SIZE: usize = 1024;

/// Interpolation quality preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleQuality {
    /// Long sinc kernel, cubic interpolation.
    #[default]
    High,
    /// Short sinc kernel, linear interpolation.
    Fast,
}

impl ResampleQuality {
    fn sinc_parameters(self) -> SincInterpolationParameters {
        match self {
            ResampleQuality::High => SincInterpolationParameters {
                sinc_len: 256,
                f_cutoff: 0.95,
                interpolation: SincInterpolationType::Cubic,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
            ResampleQuality::Fast => SincInterpolationParameters {
                sinc_len: 64,
                f_cutoff: 0.91,
                interpolation: SincInterpolationType::Linear,
                oversampling_factor: 128,
                window: WindowFunction::Hann2,
            },
        }
    }
}

/// Number of output frames produced for `input_len` frames.
pub fn output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    if from_rate == 0 {
        return 0;
    }
    (input_len as f64 * to_rate as f64 / from_rate as f64).ceil() as usize
}

/// Resamples mono `samples` from `from_rate` to `to_rate`.
///
/// Output frame `i` lines up with input time `i / to_rate`. `SincFixedIn`
/// already drops its own group delay from the first chunk it returns, so
/// the output is only flushed and cut to exactly [`output_len`] frames.
pub fn resample(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
    quality: ResampleQuality,
) -> ResampleResult<Vec<f32>> {
    if from_rate == 0 {
        return Err(ResampleError::InvalidSampleRate { rate: from_rate });
    }
    if to_rate == 0 {
        return Err(ResampleError::InvalidSampleRate { rate: to_rate });
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let expected = output_len(samples.len(), from_rate, to_rate);

    let mut resampler =
        SincFixedIn::<f32>::new(ratio, 1.0, quality.sinc_parameters(), CHUNK_SIZE, 1)
            .map_err(|e| ResampleError::resampler(format!("failed to create resampler: {}", e)))?;
    let mut output = Vec::with_capacity(expected + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        let out = resampler
            .process(&[chunk][..], None)
            .map_err(|e| ResampleError::resampler(format!("resampling failed: {}", e)))?;
        output.extend_from_slice(&out[0]);
    }

    let rest = chunks.remainder();
    if !rest.is_empty() {
        let out = resampler
            .process_partial(Some(&[rest][..]), None)
            .map_err(|e| ResampleError::resampler(format!("resampling failed: {}", e)))?;
        output.extend_from_slice(&out[0]);
    }

    // Flush the filter tail until every input frame has been emitted.
    while output.len() < expected {
        let out = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| ResampleError::resampler(format!("resampler flush failed: {}", e)))?;
        if out[0].is_empty() {
            break;
        }
        output.extend_from_slice(&out[0]);
    }

    output.resize(expected, 0.0);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (std::f32::consts::TAU * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    /// Frames where the signal crosses zero going up.
    fn crossing_frames(samples: &[f32]) -> Vec<usize> {
        samples
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] < 0.0 && w[1] >= 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Counts upward zero crossings, a cheap frequency estimate.
    fn rising_crossings(samples: &[f32]) -> usize {
        crossing_frames(samples).len()
    }

    #[test]
    fn test_same_rate_is_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(
            resample(&samples, 44100, 44100, ResampleQuality::High).unwrap(),
            samples
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], 44100, 22050, ResampleQuality::High)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = resample(&[0.0; 4], 0, 22050, ResampleQuality::High).unwrap_err();
        assert!(matches!(err, ResampleError::InvalidSampleRate { rate: 0 }));

        let err = resample(&[0.0; 4], 44100, 0, ResampleQuality::Fast).unwrap_err();
        assert!(matches!(err, ResampleError::InvalidSampleRate { rate: 0 }));
    }

    #[test]
    fn test_output_len_rounds_up() {
        assert_eq!(output_len(44100, 44100, 22050), 22050);
        assert_eq!(output_len(44101, 44100, 22050), 22051);
        assert_eq!(output_len(3, 44100, 22050), 2);
    }

    #[test]
    fn test_halving_length() {
        let input = sine(440.0, 44100, 44100 + 333);
        let output = resample(&input, 44100, 22050, ResampleQuality::High).unwrap();
        assert_eq!(output.len(), output_len(input.len(), 44100, 22050));
    }

    #[test]
    fn test_short_input_shorter_than_chunk() {
        let input = sine(440.0, 44100, 300);
        let output = resample(&input, 44100, 22050, ResampleQuality::Fast).unwrap();
        assert_eq!(output.len(), 150);
    }

    #[test]
    fn test_frequency_preserved() {
        let input = sine(440.0, 44100, 44100);
        let output = resample(&input, 44100, 22050, ResampleQuality::High).unwrap();

        // One second of 440 Hz has ~440 rising crossings at any rate.
        let crossings = rising_crossings(&output) as i64;
        assert!((crossings - 440).abs() <= 2, "got {} crossings", crossings);
    }

    #[test]
    fn test_output_is_aligned() {
        let input = sine(100.0, 44100, 44100);
        let output = resample(&input, 44100, 22050, ResampleQuality::High).unwrap();
        let reference = sine(100.0, 22050, output.len());

        // Skip the edges where the filter sees zero padding.
        for i in 2000..20000 {
            assert!(
                (output[i] - reference[i]).abs() < 0.05,
                "frame {}: {} vs {}",
                i,
                output[i],
                reference[i]
            );
        }
    }

    #[test]
    fn test_leading_crossings_line_up() {
        let input = sine(440.0, 44100, 44100);
        let output = resample(&input, 44100, 22050, ResampleQuality::High).unwrap();
        let reference = sine(440.0, 22050, output.len());

        let got: Vec<usize> = crossing_frames(&output[..400]);
        let want: Vec<usize> = crossing_frames(&reference[..400]);
        assert_eq!(got.len(), want.len(), "{:?} vs {:?}", got, want);
        for (g, w) in got.iter().zip(&want) {
            assert!(g.abs_diff(*w) <= 1, "{:?} vs {:?}", got, want);
        }
    }

    #[test]
    fn test_tail_keeps_signal() {
        let input = sine(440.0, 44100, 44100);
        let output = resample(&input, 44100, 22050, ResampleQuality::High).unwrap();
        let tail = &output[output.len() - 2000..];

        // 2000 frames of 440 Hz at 22.05 kHz hold ~40 periods.
        let crossings = rising_crossings(tail) as i64;
        assert!((crossings - 40).abs() <= 2, "got {} crossings", crossings);
        let level = tail[..1800].iter().map(|s| s.abs()).fold(0.0, f32::max);
        assert!(level > 0.9, "tail peak {}", level);
    }

    #[test]
    fn test_fast_quality_is_aligned() {
        let input = sine(200.0, 44100, 8820);
        let output = resample(&input, 44100, 22050, ResampleQuality::Fast).unwrap();
        let reference = sine(200.0, 22050, output.len());
        for i in 200..4000 {
            assert!(
                (output[i] - reference[i]).abs() < 0.05,
                "frame {}: {} vs {}",
                i,
                output[i],
                reference[i]
            );
        }
    }

    #[test]
    fn test_upsampling() {
        let input = sine(440.0, 22050, 22050);
        let output = resample(&input, 22050, 44100, ResampleQuality::Fast).unwrap();
        assert_eq!(output.len(), 44100);
    }
}
