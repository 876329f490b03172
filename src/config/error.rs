//! Configuration error types.

use thiserror::Error;

use crate::credibility::CredibilityError;
use crate::encoder::EncoderError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An integer variable could not be parsed.
    #[error("failed to parse {var}='{value}' as an integer: {source}")]
    IntParseError {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A decimal variable could not be parsed.
    #[error("failed to parse {var}='{value}' as a number: {source}")]
    FloatParseError {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The derived credibility policy was rejected.
    #[error("invalid credibility policy: {0}")]
    Policy(#[from] CredibilityError),

    /// The derived encoder configuration was rejected.
    #[error("invalid encoder configuration: {0}")]
    Encoder(#[from] EncoderError),
}
