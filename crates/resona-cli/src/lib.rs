//! Resona CLI library
//!
//! Command implementations shared by the `resona` binary and integration
//! tests.

pub mod commands;
