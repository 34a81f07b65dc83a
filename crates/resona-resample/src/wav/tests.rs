//! Tests for WAV loading and writing.

use super::*;
use pretty_assertions::assert_eq;

fn write_stereo_i16(path: &Path, frames: &[(i16, i16)], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &(l, r) in frames {
        writer.write_sample(l).unwrap();
        writer.write_sample(r).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_pcm16_roundtrip_preserves_rate_and_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    let samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
    let audio = AudioBuffer::new(samples.clone(), 22050);

    write_wav(&path, &audio, OutputFormat::Pcm16).unwrap();
    let loaded = read_wav(&path).unwrap();

    assert_eq!(loaded.sample_rate, 22050);
    assert_eq!(loaded.source_channels, 1);
    assert_eq!(loaded.samples.len(), 1000);
    for (a, b) in loaded.samples.iter().zip(&samples) {
        assert!((a - b).abs() < 1e-4);
    }
}

#[test]
fn test_float32_written_as_float() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("float.wav");
    let audio = AudioBuffer::new(vec![0.25, -0.5, 0.75], 44100);

    write_wav(&path, &audio, OutputFormat::Float32).unwrap();
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
    assert_eq!(reader.spec().bits_per_sample, 32);

    let loaded = read_wav(&path).unwrap();
    assert_eq!(loaded.samples, vec![0.25, -0.5, 0.75]);
}

#[test]
fn test_stereo_is_averaged_to_mono() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    write_stereo_i16(&path, &[(16384, 0), (-16384, -16384), (8192, 24576)], 44100);

    let loaded = read_wav(&path).unwrap();
    assert_eq!(loaded.source_channels, 2);
    assert_eq!(loaded.samples, vec![0.25, -0.5, 0.5]);
}

#[test]
fn test_samples_clamped_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hot.wav");
    let audio = AudioBuffer::new(vec![2.0, -3.0], 22050);

    write_wav(&path, &audio, OutputFormat::Pcm16).unwrap();
    let raw: Vec<i16> = hound::WavReader::open(&path)
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(raw, vec![i16::MAX, -i16::MAX]);
}

#[test]
fn test_garbage_file_is_wav_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.wav");
    std::fs::write(&path, b"definitely not a riff file").unwrap();

    let err = read_wav(&path).unwrap_err();
    assert_eq!(err.code(), "RESAMPLE_002");
}

#[test]
fn test_duration_and_peak() {
    let audio = AudioBuffer::new(vec![0.1, -0.9, 0.3, 0.0], 4);
    assert_eq!(audio.duration_seconds(), 1.0);
    assert_eq!(audio.peak(), 0.9);
}

#[test]
fn test_downmix_drops_partial_frame() {
    assert_eq!(downmix(&[1.0, 0.0, 0.5], 2), vec![0.5]);
}
