use super::error::EncoderError;

pub const DEFAULT_EMBEDDING_DIM: usize = crate::constants::EMBEDDING_DIM;

pub const DEFAULT_YEARS_CAP: f32 = crate::constants::YEARS_OF_EXPERIENCE_CAP;

#[derive(Debug, Clone, PartialEq)]
pub struct EncoderConfig {
    pub embedding_dim: usize,

    pub years_of_experience_cap: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            years_of_experience_cap: DEFAULT_YEARS_CAP,
        }
    }
}

impl EncoderConfig {
    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn validate(&self) -> Result<(), EncoderError> {
        if self.embedding_dim == 0 {
            return Err(EncoderError::InvalidConfig {
                reason: "embedding_dim cannot be zero".to_string(),
            });
        }

        if !self.years_of_experience_cap.is_finite() || self.years_of_experience_cap <= 0.0 {
            return Err(EncoderError::InvalidConfig {
                reason: format!(
                    "years_of_experience_cap must be positive, got {}",
                    self.years_of_experience_cap
                ),
            });
        }

        Ok(())
    }
}
