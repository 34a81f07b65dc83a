//! Render command implementation
//!
//! Runs the resonance synthesizer over a single F0 track and writes the
//! result as a WAV file for listening.

use anyhow::{bail, Context, Result};
use candle_core::{Device, Tensor};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use resona_resample::{write_wav, AudioBuffer, OutputFormat};
use resona_synth::{AdaptiveResonance, ResonanceConfig};

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub output: String,
    pub frames: usize,
    pub sample_rate: u32,
    pub n_resonances: usize,
    /// Peak before normalization
    pub peak: f32,
    pub normalized: bool,
}

/// Run the render command.
///
/// # Arguments
/// * `f0_path` - F0 track, a JSON array or whitespace/comma separated numbers
/// * `config_path` - Optional resonance config JSON
/// * `sample_rate` - Rate written to the WAV header
/// * `output` - Output WAV path
/// * `json_output` - Whether to print the summary as JSON
pub fn run(
    f0_path: &str,
    config_path: Option<&str>,
    sample_rate: u32,
    output: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let track = load_f0_track(Path::new(f0_path))?;

    let config = match config_path {
        Some(path) => ResonanceConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => ResonanceConfig::default(),
    };

    let summary = render_track(&track, config, sample_rate, Path::new(output))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", "Render".cyan().bold());
        println!("{}", "======".dimmed());
        println!("{} {}", "F0:".dimmed(), f0_path);
        println!("Frames:      {}", summary.frames);
        println!("Resonances:  {}", summary.n_resonances);
        println!("Peak:        {:.4}", summary.peak);
        if summary.normalized {
            println!("{}", "Normalized to peak 1.0".yellow());
        }
        println!("{} {}", "SAVED".green(), summary.output);
    }

    Ok(ExitCode::SUCCESS)
}

/// Synthesizes `track` as a batch of one and writes it to `output`.
pub fn render_track(
    track: &[f32],
    config: ResonanceConfig,
    sample_rate: u32,
    output: &Path,
) -> Result<RenderSummary> {
    let mut module = AdaptiveResonance::new(config).context("Invalid resonance config")?;
    let f0 = Tensor::from_vec(track.to_vec(), (1, track.len()), &Device::Cpu)?;
    let signal = module
        .synthesize(&f0)
        .context("Synthesis failed")?
        .flatten_all()?
        .to_vec1::<f32>()?;

    let mut audio = AudioBuffer::new(signal, sample_rate);
    let peak = audio.peak();
    let normalized = peak > 1.0;
    if normalized {
        for s in &mut audio.samples {
            *s /= peak;
        }
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    write_wav(output, &audio, OutputFormat::Pcm16)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    debug!(frames = audio.samples.len(), peak, normalized, "rendered f0 track");

    Ok(RenderSummary {
        output: output.display().to_string(),
        frames: audio.samples.len(),
        sample_rate,
        n_resonances: module.n_resonances(),
        peak,
        normalized,
    })
}

/// Reads an F0 track from a JSON array or a list of numbers separated by
/// whitespace or commas.
pub fn load_f0_track(path: &Path) -> Result<Vec<f32>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read F0 file: {}", path.display()))?;
    let trimmed = content.trim();

    let values: Vec<f32> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .with_context(|| format!("Failed to parse F0 JSON: {}", path.display()))?
    } else {
        trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<f32>()
                    .with_context(|| format!("Invalid F0 value '{}' in {}", tok, path.display()))
            })
            .collect::<Result<_>>()?
    };

    if values.is_empty() {
        bail!("F0 file is empty: {}", path.display());
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        bail!("F0 value {} in {} is not finite", bad, path.display());
    }
    Ok(values)
}
