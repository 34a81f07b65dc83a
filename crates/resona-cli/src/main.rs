//! Resona CLI - dataset preprocessing and source rendering
//!
//! This binary resamples recorded datasets and renders F0 tracks through the
//! resonance synthesizer for listening.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use resona_cli::commands;
use resona_resample::batch::{
    DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_RATE, DEFAULT_TARGET_RATE,
};
use resona_resample::{OutputFormat, ResampleJob, ResampleQuality};

/// Resona - singing voice source tools
#[derive(Parser)]
#[command(name = "resona")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample every source-rate WAV file in a folder
    Resample {
        /// Folder scanned for .wav files (not recursive)
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        input_dir: String,

        /// Folder the converted files are written to
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: String,

        /// Only files at this rate are converted
        #[arg(long, default_value_t = DEFAULT_SOURCE_RATE)]
        source_rate: u32,

        /// Rate of the written files
        #[arg(long, default_value_t = DEFAULT_TARGET_RATE)]
        target_rate: u32,

        /// Output sample encoding
        #[arg(long, default_value = "pcm16", value_parser = ["pcm16", "float32"])]
        format: String,

        /// Use the shorter sinc filter
        #[arg(long)]
        fast: bool,

        /// Record unreadable files as failures and continue
        #[arg(long)]
        keep_going: bool,

        /// Output machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render an F0 track through the resonance synthesizer
    Render {
        /// F0 track (JSON array or whitespace/comma separated numbers)
        #[arg(long)]
        f0: String,

        /// Resonance config JSON
        #[arg(short, long)]
        config: Option<String>,

        /// Sample rate written to the WAV header
        #[arg(long, default_value_t = DEFAULT_TARGET_RATE)]
        sample_rate: u32,

        /// Output WAV path
        #[arg(short, long, default_value = "out.wav")]
        output: String,

        /// Output machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Resample {
            input_dir,
            output_dir,
            source_rate,
            target_rate,
            format,
            fast,
            keep_going,
            json,
        } => {
            let format = match format.as_str() {
                "float32" => OutputFormat::Float32,
                _ => OutputFormat::Pcm16,
            };
            let quality = if fast {
                ResampleQuality::Fast
            } else {
                ResampleQuality::High
            };
            let job = ResampleJob::new(input_dir, output_dir)
                .with_rates(source_rate, target_rate)
                .with_format(format)
                .with_quality(quality)
                .with_keep_going(keep_going);
            commands::resample::run(&job, json)
        }
        Commands::Render {
            f0,
            config,
            sample_rate,
            output,
            json,
        } => commands::render::run(&f0, config.as_deref(), sample_rate, &output, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_resample_defaults() {
        let cli = Cli::try_parse_from(["resona", "resample"]).unwrap();
        match cli.command {
            Commands::Resample {
                input_dir,
                output_dir,
                source_rate,
                target_rate,
                format,
                fast,
                keep_going,
                json,
            } => {
                assert_eq!(input_dir, "wav_dump2");
                assert_eq!(output_dir, "wav_dump");
                assert_eq!(source_rate, 44100);
                assert_eq!(target_rate, 22050);
                assert_eq!(format, "pcm16");
                assert!(!fast);
                assert!(!keep_going);
                assert!(!json);
            }
            _ => panic!("expected resample command"),
        }
    }

    #[test]
    fn test_cli_parses_resample_overrides() {
        let cli = Cli::try_parse_from([
            "resona",
            "resample",
            "--input-dir",
            "raw",
            "--output-dir",
            "cooked",
            "--source-rate",
            "48000",
            "--target-rate",
            "24000",
            "--format",
            "float32",
            "--fast",
            "--keep-going",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Resample {
                input_dir,
                source_rate,
                target_rate,
                format,
                fast,
                keep_going,
                json,
                ..
            } => {
                assert_eq!(input_dir, "raw");
                assert_eq!((source_rate, target_rate), (48000, 24000));
                assert_eq!(format, "float32");
                assert!(fast && keep_going && json);
            }
            _ => panic!("expected resample command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let err = Cli::try_parse_from(["resona", "resample", "--format", "mp3"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "resona", "render", "--f0", "track.txt", "-c", "cfg.json", "-o", "x.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                f0,
                config,
                sample_rate,
                output,
                json,
            } => {
                assert_eq!(f0, "track.txt");
                assert_eq!(config.as_deref(), Some("cfg.json"));
                assert_eq!(sample_rate, 22050);
                assert_eq!(output, "x.wav");
                assert!(!json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_render_requires_f0() {
        assert!(Cli::try_parse_from(["resona", "render"]).is_err());
    }
}
