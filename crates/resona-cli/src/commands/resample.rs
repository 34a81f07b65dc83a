//! Batch resample command implementation
//!
//! Converts every `.wav` file at the source rate in one folder to the target
//! rate, skipping the others. Prints one line per file and a summary.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use resona_resample::{BatchReport, FileOutcome, FileStatus, ResampleJob};

/// Run the resample command.
///
/// # Arguments
/// * `job` - Fully configured batch job
/// * `json_output` - Whether to print the report as JSON instead of text
///
/// # Returns
/// Exit code: 0 if no file failed, 1 otherwise
pub fn run(job: &ResampleJob, json_output: bool) -> Result<ExitCode> {
    if !json_output {
        println!("{}", "Resample".cyan().bold());
        println!("{}", "========".dimmed());
        println!(
            "{} {} -> {} ({} Hz -> {} Hz)\n",
            "Folders:".dimmed(),
            job.input_dir.display(),
            job.output_dir.display(),
            job.source_rate,
            job.target_rate
        );
    }

    let report = job
        .run_with(|outcome| {
            if !json_output {
                print_outcome(outcome, job.source_rate);
            }
        })
        .with_context(|| format!("Batch resample of {} failed", job.input_dir.display()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_outcome(outcome: &FileOutcome, source_rate: u32) {
    match &outcome.status {
        FileStatus::Converted { output, .. } => {
            println!("{} {}", "SAVED".green(), output);
        }
        FileStatus::Skipped { sample_rate } => {
            println!(
                "{} {} {}",
                "SKIP".yellow(),
                outcome.path,
                format!("(not {} Hz, found {} Hz)", source_rate, sample_rate).dimmed()
            );
        }
        FileStatus::Failed { error } => {
            println!("{} {} - {}", "ERROR".red(), outcome.path, error);
        }
    }
}

fn print_summary(report: &BatchReport) {
    println!("\n{}", "Summary".cyan().bold());
    println!("{}", "-------".dimmed());
    println!("Total:     {}", report.files.len());
    println!("Converted: {}", format!("{}", report.converted).green());
    println!("Skipped:   {}", report.skipped);
    if report.failed > 0 {
        println!("Failed:    {}", format!("{}", report.failed).red());
        println!("\n{}", "Some files failed.".red().bold());
    } else {
        println!("Failed:    0");
    }
}
