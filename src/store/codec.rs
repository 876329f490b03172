//! JSON wire codec for persisted records.
//!
//! Records are validated once here; everything past the boundary can trust
//! the invariants on [`CredibilityScore`] and [`MeetingRating`].

use tracing::warn;

use crate::constants::{MAX_SCORE, MIN_SCORE, is_valid_score};
use crate::credibility::{CredibilityScore, CredibilityTier, MeetingRating, TierTable};

use super::error::{StoreError, StoreResult};

const CREDIBILITY_RECORD: &str = "credibility record";
const MEETING_RATING: &str = "meeting rating";

/// Decodes and validates a persisted credibility record against the product ladder.
pub fn decode_credibility_record(bytes: &[u8]) -> StoreResult<CredibilityScore> {
    decode_credibility_record_with(bytes, &TierTable::default())
}

/// Decodes and validates a persisted credibility record.
///
/// The tier is re-derived from the score with `tiers`; a persisted tier that
/// disagrees is logged and replaced. Banned records are normalized to score 0.
pub fn decode_credibility_record_with(
    bytes: &[u8],
    tiers: &TierTable,
) -> StoreResult<CredibilityScore> {
    let mut record: CredibilityScore =
        serde_json::from_slice(bytes).map_err(|source| StoreError::Decode {
            record: CREDIBILITY_RECORD,
            source,
        })?;

    if record.user_id.trim().is_empty() {
        return Err(invalid(CREDIBILITY_RECORD, "user_id", "must not be empty"));
    }
    if !is_valid_score(record.overall_score) {
        return Err(invalid(
            CREDIBILITY_RECORD,
            "overall_score",
            format!("{} is not a multiple of 0.5 in [0, 5]", record.overall_score),
        ));
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&record.average_rating) {
        return Err(invalid(
            CREDIBILITY_RECORD,
            "average_rating",
            format!("{} is outside [0, 5]", record.average_rating),
        ));
    }
    if !(0.0..=100.0).contains(&record.fulfillment_rate) {
        return Err(invalid(
            CREDIBILITY_RECORD,
            "fulfillment_rate",
            format!("{} is outside [0, 100]", record.fulfillment_rate),
        ));
    }
    if record.total_no_shows > record.total_meetings {
        return Err(invalid(
            CREDIBILITY_RECORD,
            "total_no_shows",
            "exceeds total_meetings",
        ));
    }

    if record.is_banned {
        record.overall_score = MIN_SCORE;
    }
    let derived = if record.is_banned {
        CredibilityTier::Banned
    } else {
        tiers.tier_for(record.overall_score)
    };
    if derived != record.tier {
        warn!(
            user_id = %record.user_id,
            persisted = %record.tier,
            derived = %derived,
            "Persisted tier disagrees with score, using derived tier"
        );
        record.tier = derived;
    }

    Ok(record)
}

pub fn encode_credibility_record(record: &CredibilityScore) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(record).map_err(|source| StoreError::Encode {
        record: CREDIBILITY_RECORD,
        source,
    })
}

/// Decodes a rating (decimal `rating`, integer `duration_seconds`) and
/// re-applies construction rules.
pub fn decode_meeting_rating(bytes: &[u8]) -> StoreResult<MeetingRating> {
    let mut rating: MeetingRating =
        serde_json::from_slice(bytes).map_err(|source| StoreError::Decode {
            record: MEETING_RATING,
            source,
        })?;

    rating
        .validate()
        .map_err(|e| invalid(MEETING_RATING, "rating", e.to_string()))?;

    if let Some(comment) = rating.comment.take() {
        rating = rating.with_comment(comment);
    }

    Ok(rating)
}

pub fn encode_meeting_rating(rating: &MeetingRating) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(rating).map_err(|source| StoreError::Encode {
        record: MEETING_RATING,
        source,
    })
}

fn invalid(record: &'static str, field: &'static str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidRecord {
        record,
        field,
        reason: reason.into(),
    }
}
