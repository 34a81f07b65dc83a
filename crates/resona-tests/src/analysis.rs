//! Signal measurements used by the integration tests.

/// Frame indices where the signal crosses zero going up.
pub fn rising_crossings(samples: &[f32]) -> Vec<usize> {
    samples
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] < 0.0 && w[1] >= 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Estimates the frequency of a roughly periodic signal from its
/// rising zero crossings.
///
/// Returns `None` if fewer than two crossings are found.
pub fn zero_crossing_frequency(samples: &[f32], sample_rate: u32) -> Option<f64> {
    let crossings = rising_crossings(samples);
    let (first, last) = (crossings.first()?, crossings.last()?);
    if crossings.len() < 2 || last == first {
        return None;
    }
    let periods = (crossings.len() - 1) as f64;
    let span = (last - first) as f64 / sample_rate as f64;
    Some(periods / span)
}

/// Root mean square level.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Largest absolute element-wise difference. Panics if lengths differ.
pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sine;

    #[test]
    fn test_zero_crossing_frequency_of_sine() {
        let tone = sine(440.0, 22050, 22050, 0.5);
        let f = zero_crossing_frequency(&tone, 22050).unwrap();
        assert!((f - 440.0).abs() < 1.0, "got {}", f);
    }

    #[test]
    fn test_zero_crossing_frequency_of_silence() {
        assert_eq!(zero_crossing_frequency(&[0.0; 100], 22050), None);
    }

    #[test]
    fn test_rms_of_full_scale_sine() {
        let tone = sine(100.0, 8000, 8000, 1.0);
        assert!((rms(&tone) - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    }
}
