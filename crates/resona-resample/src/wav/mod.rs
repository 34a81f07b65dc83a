//! WAV loading and writing.
//!
//! Files are always loaded as mono f32 in `[-1, 1]`: integer PCM is
//! normalized by its bit depth and multi-channel audio is averaged down to
//! one channel. Output is mono, 16-bit PCM unless float is requested.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResampleError, ResampleResult};

/// Mono audio at a known sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Samples in `[-1, 1]`.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count of the file the samples were loaded from.
    pub source_channels: u16,
}

impl AudioBuffer {
    /// Creates a mono buffer.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            source_channels: 1,
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |a, s| a.max(s.abs()))
    }
}

/// Sample encoding used when writing WAV files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// 16-bit signed integer PCM.
    #[default]
    Pcm16,
    /// 32-bit IEEE float.
    Float32,
}

impl OutputFormat {
    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            OutputFormat::Pcm16 => (16, hound::SampleFormat::Int),
            OutputFormat::Float32 => (32, hound::SampleFormat::Float),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Loads a WAV file as mono f32 samples.
pub fn read_wav(path: &Path) -> ResampleResult<AudioBuffer> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(ResampleError::InvalidSampleRate { rate: 0 });
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
    };

    Ok(AudioBuffer {
        samples: downmix(&interleaved, spec.channels),
        sample_rate: spec.sample_rate,
        source_channels: spec.channels,
    })
}

/// Writes a mono buffer, clamping samples to `[-1, 1]` first.
pub fn write_wav(path: &Path, audio: &AudioBuffer, format: OutputFormat) -> ResampleResult<()> {
    if audio.sample_rate == 0 {
        return Err(ResampleError::InvalidSampleRate { rate: 0 });
    }

    let mut writer = hound::WavWriter::create(path, format.spec(audio.sample_rate))?;
    match format {
        OutputFormat::Pcm16 => {
            for &s in &audio.samples {
                writer.write_sample(quantize_i16(s))?;
            }
        }
        OutputFormat::Float32 => {
            for &s in &audio.samples {
                writer.write_sample(s.clamp(-1.0, 1.0))?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}

/// Full-scale magnitude of integer PCM with the given bit depth.
fn int_scale(bits_per_sample: u16) -> f32 {
    let bits = bits_per_sample.clamp(1, 32) as i32;
    2f32.powi(bits - 1)
}

fn quantize_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

/// Averages interleaved frames down to one channel.
fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    let channels = channels as usize;
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests;
