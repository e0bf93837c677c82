//! Deterministic season synthesizer for harvest-dash.
//!
//! Produces one [`types::DailyRecord`] per calendar day from closed-form
//! seasonal curves plus seeded random noise. The same config and seed always
//! produce the same series, which makes the generated dataset reproducible
//! end to end (down to the serialized bytes).
//!
//! # Modules
//!
//! - [`config`] - Synthesizer configuration with defaults and presets
//! - [`generator`] - The two-pass record generator
//!
//! # Example
//!
//! ```
//! use synth::{SeasonSynthesizer, SynthConfig};
//!
//! let config = SynthConfig::default().seed(42);
//! let records = SeasonSynthesizer::new(config).unwrap().generate();
//! assert_eq!(records.len(), 365);
//! ```

pub mod config;
pub mod generator;

pub use config::SynthConfig;
pub use generator::{SeasonSynthesizer, economics};

use chrono::NaiveDate;

/// Errors from synthesizer construction.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The configured date range contains no days.
    #[error("empty date range: {start} to {end}")]
    EmptyDateRange { start: NaiveDate, end: NaiveDate },

    /// A configured parameter is out of its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A noise distribution could not be constructed from the config.
    #[error("failed to build distribution: {0}")]
    Distribution(String),
}
