//! Test fixture utilities for creating synthetic recording folders.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary dataset with an input folder and an (absent) output folder.
pub struct DatasetFixture {
    pub root: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl DatasetFixture {
    /// Create an empty input folder.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let input_dir = root.path().join("wav_dump2");
        let output_dir = root.path().join("wav_dump");
        fs::create_dir_all(&input_dir).expect("Failed to create input dir");
        Self {
            root,
            input_dir,
            output_dir,
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Add a 16-bit mono sine recording.
    ///
    /// # Arguments
    /// * `name` - File name including extension
    /// * `sample_rate` - Rate written to the header
    /// * `frequency` - Tone frequency in Hz
    /// * `frames` - Number of samples
    pub fn add_tone(&self, name: &str, sample_rate: u32, frequency: f32, frames: usize) -> PathBuf {
        let path = self.input_dir.join(name);
        let samples: Vec<f32> = sine(frequency, sample_rate, frames, 0.5);
        write_pcm16(&path, sample_rate, 1, &samples);
        path
    }

    /// Add a 16-bit stereo recording with `left` and `right` interleaved.
    pub fn add_stereo(&self, name: &str, sample_rate: u32, left: &[f32], right: &[f32]) -> PathBuf {
        let path = self.input_dir.join(name);
        let interleaved: Vec<f32> = left
            .iter()
            .zip(right)
            .flat_map(|(l, r)| [*l, *r])
            .collect();
        write_pcm16(&path, sample_rate, 2, &interleaved);
        path
    }

    /// Add a file that is not a readable WAV.
    pub fn add_corrupt(&self, name: &str) -> PathBuf {
        let path = self.input_dir.join(name);
        fs::write(&path, b"RIFF\x10\x00\x00\x00WAVEjunk").expect("Failed to write corrupt file");
        path
    }

    /// Add an arbitrary non-audio file.
    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input_dir.join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for DatasetFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// `frames` samples of a sine at `frequency` Hz.
pub fn sine(frequency: f32, sample_rate: u32, frames: usize, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (std::f32::consts::TAU * frequency * t).sin() * amplitude
        })
        .collect()
}

fn write_pcm16(path: &Path, sample_rate: u32, channels: u16, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for s in samples {
        let v = (s.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        writer.write_sample(v).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}
