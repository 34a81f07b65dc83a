//! Command implementations for the Resona CLI

pub mod render;
pub mod resample;
