//! Cross-cutting, shared constants.
//!
//! These are the product defaults. Every one of them can be overridden through
//! [`crate::config::EngineConfig`]; modules read the configured value, not the constant.

/// Embedding dimension produced by the encoder's hashing projection.
pub const EMBEDDING_DIM: usize = 64;

/// Years of experience at which the normalized scalar saturates to 1.0.
pub const YEARS_OF_EXPERIENCE_CAP: f32 = 50.0;

/// Norms below this are treated as zero (no normalization, no division).
pub const NORM_EPSILON: f32 = 1e-10;

/// Flat bonus added per concept tag shared between a candidate and the query.
pub const DEFAULT_CONCEPT_BONUS: f64 = 3.0;

/// Inactivity (in days) before credibility decay starts.
pub const DEFAULT_DECAY_THRESHOLD_DAYS: i64 = 15;

/// Lowest score decay can push a record down to.
pub const DECAY_FLOOR: f64 = 0.5;

/// Freshness window for cached credibility scores.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Max entries held by the credibility cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default number of candidates returned by a ranking request.
pub const DEFAULT_RANKING_LIMIT: usize = 50;

/// Score given to a user before any meeting has been recorded.
pub const DEFAULT_CREDIBILITY_SCORE: f64 = 3.0;

/// Credibility scores live in `[MIN_SCORE, MAX_SCORE]` in steps of [`SCORE_STEP`].
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 5.0;
pub const SCORE_STEP: f64 = 0.5;

/// Weight of the average rating in the overall score; the fulfillment score gets the rest.
pub const RATING_WEIGHT: f64 = 0.7;
pub const FULFILLMENT_WEIGHT: f64 = 0.3;

/// Max stored length of a rating comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// Rounds to the nearest multiple of [`SCORE_STEP`].
#[inline]
pub fn round_to_half(value: f64) -> f64 {
    (value / SCORE_STEP).round() * SCORE_STEP
}

/// Returns `true` if `value` is a finite multiple of [`SCORE_STEP`] inside the score range.
#[inline]
pub fn is_valid_score(value: f64) -> bool {
    value.is_finite()
        && (MIN_SCORE..=MAX_SCORE).contains(&value)
        && ((value / SCORE_STEP) - (value / SCORE_STEP).round()).abs() < 1e-9
}
