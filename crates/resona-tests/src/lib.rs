//! Resona End-to-End Test Infrastructure
//!
//! Integration tests for the synthesizer and the dataset preprocessing job.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p resona-tests
//!
//! # A single suite
//! cargo test -p resona-tests --test proptest_init
//! ```

pub mod analysis;
pub mod fixtures;
