use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Errors returned by the encoder's checked entry points.
pub enum EncoderError {
    /// Two vectors that must share a dimension do not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid encoder configuration.
    #[error("invalid encoder configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type EncoderResult<T> = Result<T, EncoderError>;
