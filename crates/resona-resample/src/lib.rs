//! Resona Dataset Preprocessing
//!
//! Prepares training audio for the vocoder: WAV files recorded at 44.1 kHz
//! are downmixed to mono and resampled to 22.05 kHz.
//!
//! # Overview
//!
//! - [`wav`] - Mono WAV loading via `hound`, 16-bit or float output
//! - [`resample`] - Windowed-sinc sample rate conversion via `rubato`
//! - [`batch`] - Folder-level job: convert files at the source rate, skip
//!   the rest, report every file
//!
//! # Example
//!
//! ```ignore
//! use resona_resample::ResampleJob;
//!
//! let report = ResampleJob::new("wav_dump2", "wav_dump").run()?;
//! println!("{} converted, {} skipped", report.converted, report.skipped);
//! ```

pub mod batch;
pub mod error;
pub mod resample;
pub mod wav;

// Re-export main types at crate root
pub use batch::{BatchReport, FileOutcome, FileStatus, ResampleJob};
pub use error::{ResampleError, ResampleResult};
pub use resample::{resample, ResampleQuality};
pub use wav::{read_wav, write_wav, AudioBuffer, OutputFormat};
