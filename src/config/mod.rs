//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TRUSTRANK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;

use crate::cache::{Clock, CredibilityCacheHandle, SystemClock};
use crate::concepts::ConceptTagger;
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS, DEFAULT_CONCEPT_BONUS,
    DEFAULT_DECAY_THRESHOLD_DAYS, DEFAULT_RANKING_LIMIT, EMBEDDING_DIM,
};
use crate::credibility::{CredibilityCalculator, CredibilityPolicy};
use crate::encoder::{EncoderConfig, TwoTowerEncoder};
use crate::ranking::{RankingConfig, RankingOrchestrator};
use crate::vocabulary::Vocabulary;

/// Engine configuration loaded from environment variables.
///
/// Use [`EngineConfig::from_env`] to read `TRUSTRANK_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Freshness window of cached credibility records. Default: `300`.
    pub cache_ttl_secs: u64,

    /// Max entries in the credibility cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// Score added per shared concept tag. Default: `3.0`.
    pub concept_bonus: f64,

    /// Days without a meeting before decay starts. Default: `15`.
    pub decay_threshold_days: i64,

    /// Output dimension of the encoder. Default: `64`.
    pub embedding_dim: usize,

    /// Max ranked candidates returned. Default: `50`.
    pub ranking_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            concept_bonus: DEFAULT_CONCEPT_BONUS,
            decay_threshold_days: DEFAULT_DECAY_THRESHOLD_DAYS,
            embedding_dim: EMBEDDING_DIM,
            ranking_limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

impl EngineConfig {
    pub const ENV_CACHE_TTL_SECS: &'static str = "TRUSTRANK_CACHE_TTL_SECS";
    pub const ENV_CACHE_CAPACITY: &'static str = "TRUSTRANK_CACHE_CAPACITY";
    pub const ENV_CONCEPT_BONUS: &'static str = "TRUSTRANK_CONCEPT_BONUS";
    pub const ENV_DECAY_THRESHOLD_DAYS: &'static str = "TRUSTRANK_DECAY_THRESHOLD_DAYS";
    pub const ENV_EMBEDDING_DIM: &'static str = "TRUSTRANK_EMBEDDING_DIM";
    pub const ENV_RANKING_LIMIT: &'static str = "TRUSTRANK_RANKING_LIMIT";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Unset or blank variables use the default; malformed values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            cache_ttl_secs: Self::parse_int_from_env(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl_secs)?,
            cache_capacity: Self::parse_int_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity)?,
            concept_bonus: Self::parse_float_from_env(Self::ENV_CONCEPT_BONUS, defaults.concept_bonus)?,
            decay_threshold_days: Self::parse_int_from_env(
                Self::ENV_DECAY_THRESHOLD_DAYS,
                defaults.decay_threshold_days,
            )?,
            embedding_dim: Self::parse_int_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?,
            ranking_limit: Self::parse_int_from_env(Self::ENV_RANKING_LIMIT, defaults.ranking_limit)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_concept_bonus(mut self, bonus: f64) -> Self {
        self.concept_bonus = bonus;
        self
    }

    pub fn with_decay_threshold_days(mut self, days: i64) -> Self {
        self.decay_threshold_days = days;
        self
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn with_ranking_limit(mut self, limit: usize) -> Self {
        self.ranking_limit = limit;
        self
    }

    /// Checks basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache_ttl_secs",
                reason: "must be positive".to_string(),
            });
        }

        if self.cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache_capacity",
                reason: "must be positive".to_string(),
            });
        }

        if !self.concept_bonus.is_finite() || self.concept_bonus < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "concept_bonus",
                reason: format!("must be finite and non-negative, got {}", self.concept_bonus),
            });
        }

        if self.decay_threshold_days < 1 {
            return Err(ConfigError::InvalidValue {
                field: "decay_threshold_days",
                reason: format!("must be at least 1, got {}", self.decay_threshold_days),
            });
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidValue {
                field: "embedding_dim",
                reason: "must be positive".to_string(),
            });
        }

        if self.ranking_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ranking_limit",
                reason: "must be positive".to_string(),
            });
        }

        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(i64::try_from(self.cache_ttl_secs).unwrap_or(i64::MAX))
    }

    pub fn encoder(&self) -> Result<TwoTowerEncoder, ConfigError> {
        let config = EncoderConfig::default().with_embedding_dim(self.embedding_dim);
        Ok(TwoTowerEncoder::try_new(Vocabulary::default(), config)?)
    }

    pub fn tagger(&self) -> ConceptTagger {
        ConceptTagger::default().with_bonus(self.concept_bonus)
    }

    pub fn policy(&self) -> CredibilityPolicy {
        CredibilityPolicy::default().with_decay_threshold_days(self.decay_threshold_days)
    }

    pub fn calculator(&self) -> Result<CredibilityCalculator, ConfigError> {
        Ok(CredibilityCalculator::new(self.policy())?)
    }

    pub fn orchestrator(&self) -> Result<RankingOrchestrator, ConfigError> {
        Ok(RankingOrchestrator::new(
            self.encoder()?,
            self.tagger(),
            self.calculator()?,
            RankingConfig::default().with_limit(self.ranking_limit),
        ))
    }

    /// Cache handle on the system clock.
    pub fn cache(&self) -> CredibilityCacheHandle {
        self.cache_with_clock(Arc::new(SystemClock))
    }

    pub fn cache_with_clock(&self, clock: Arc<dyn Clock>) -> CredibilityCacheHandle {
        CredibilityCacheHandle::with_clock(self.cache_ttl(), self.cache_capacity, clock)
    }

    fn read_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_int_from_env<T>(var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        match Self::read_env(var) {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::IntParseError { var, value, source }),
            None => Ok(default),
        }
    }

    fn parse_float_from_env(var: &'static str, default: f64) -> Result<f64, ConfigError> {
        match Self::read_env(var) {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::FloatParseError { var, value, source }),
            None => Ok(default),
        }
    }
}
