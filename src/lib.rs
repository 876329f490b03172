//! Trustrank library crate (used by the `trustrank` binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Matching
//! - [`TwoTowerEncoder`] - Profile encoding, embedding and cosine similarity
//! - [`ConceptTagger`] - Concept tags from companies, schools and query text
//! - [`RankingOrchestrator`] - Similarity + concept bonus, weighted by trust tier
//!
//! ## Trust
//! - [`CredibilityCalculator`], [`CredibilityPolicy`] - Scoring, decay, tiers, moderation
//! - [`CredibilityScore`], [`CredibilityTier`] - Per-user record and its tier
//! - [`CredibilityCacheHandle`] - Shared read-through cache of records
//!
//! ## Collaborators
//! - [`ProfileStore`], [`RatingStore`], [`CredibilityStore`] - Async store traits
//! - [`CredibilityService`], [`MatchService`] - Orchestration over the stores
//!
//! ## Configuration
//! [`EngineConfig`] reads `TRUSTRANK_*` overrides and builds the components above.
//!
//! ## Test/Mock Support
//! In-memory stores and [`ManualClock`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod concepts;
pub mod config;
pub mod constants;
pub mod credibility;
pub mod encoder;
pub mod profile;
pub mod ranking;
pub mod service;
pub mod store;
pub mod vocabulary;

#[cfg(any(test, feature = "mock"))]
pub use cache::ManualClock;
pub use cache::{CacheLookup, CacheStatus, Clock, CredibilityCacheHandle, CredibilityScoreCache, SystemClock};

pub use concepts::{ConceptTag, ConceptTagSet, ConceptTagger, Lexicons};
pub use config::{ConfigError, EngineConfig};
pub use credibility::{
    CredibilityCalculator, CredibilityError, CredibilityPolicy, CredibilityResult, CredibilityScore,
    CredibilityTier, MeetingAggregates, MeetingRating, MisconductCategory, MisconductOutcome,
    MisconductReport, RatingTag, ReportStatus, TierTable,
};
pub use encoder::{Embedding, EncoderConfig, EncoderError, FeatureVector, TwoTowerEncoder};
pub use profile::{Education, Profile};
pub use ranking::{
    Exclusion, RankedCandidate, RankingCandidate, RankingConfig, RankingOrchestrator, RawCandidate,
    ScoreBreakdown,
};
pub use service::{CredibilityService, DecaySummary, MatchService, ServiceError, ServiceResult};

#[cfg(any(test, feature = "mock"))]
pub use store::{MemoryCredibilityStore, MemoryProfileStore, MemoryRatingStore};
pub use store::{
    CredibilityStore, ProfileStore, RatingStore, StoreError, StoreResult, decode_credibility_record,
    encode_credibility_record,
};
pub use vocabulary::Vocabulary;
