// Synth shared library
// Generation-to-artifact pipeline for the Synth website builder

pub mod models;
pub mod services;

// Re-export models for use by frontends
pub use models::*;
