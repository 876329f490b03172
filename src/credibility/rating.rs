use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COMMENT_CHARS, MAX_SCORE, SCORE_STEP};

use super::error::{CredibilityError, CredibilityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Structured feedback attached to a rating.
pub enum RatingTag {
    Punctual,
    Friendly,
    Insightful,
    Professional,
    Helpful,
    GreatConversation,
    AsDescribed,
    ShortMeeting,
    Late,
    Rude,
    Distracted,
    Unprofessional,
    MisleadingProfile,
}

impl RatingTag {
    pub fn category(&self) -> TagCategory {
        match self {
            RatingTag::Punctual
            | RatingTag::Friendly
            | RatingTag::Insightful
            | RatingTag::Professional
            | RatingTag::Helpful
            | RatingTag::GreatConversation => TagCategory::Positive,
            RatingTag::AsDescribed | RatingTag::ShortMeeting => TagCategory::Neutral,
            RatingTag::Late
            | RatingTag::Rude
            | RatingTag::Distracted
            | RatingTag::Unprofessional
            | RatingTag::MisleadingProfile => TagCategory::Negative,
        }
    }
}

/// Ratings are 0.5..=5.0 in half-star steps.
pub fn is_valid_rating(value: f64) -> bool {
    if !value.is_finite() || !(SCORE_STEP..=MAX_SCORE).contains(&value) {
        return false;
    }
    let steps = value / SCORE_STEP;
    (steps - steps.round()).abs() < 1e-9
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One user's rating of another after a meeting.
pub struct MeetingRating {
    pub meeting_id: String,
    pub rater_id: String,
    pub rated_user_id: String,
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<RatingTag>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Both check-ins were GPS verified.
    #[serde(default)]
    pub gps_verified: bool,
    #[serde(default)]
    pub duration_seconds: u32,
    pub created_at: DateTime<Utc>,
}

impl MeetingRating {
    /// Validates the rating value and that rater and rated differ.
    pub fn new(
        meeting_id: impl Into<String>,
        rater_id: impl Into<String>,
        rated_user_id: impl Into<String>,
        rating: f64,
        created_at: DateTime<Utc>,
    ) -> CredibilityResult<Self> {
        let rating = Self {
            meeting_id: meeting_id.into(),
            rater_id: rater_id.into(),
            rated_user_id: rated_user_id.into(),
            rating,
            tags: Vec::new(),
            comment: None,
            gps_verified: false,
            duration_seconds: 0,
            created_at,
        };
        rating.validate()?;
        Ok(rating)
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = RatingTag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Stores the comment truncated to [`MAX_COMMENT_CHARS`] characters.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(truncate_comment(comment.into()));
        self
    }

    pub fn with_verification(mut self, gps_verified: bool, duration_secs: u32) -> Self {
        self.gps_verified = gps_verified;
        self.duration_seconds = duration_secs;
        self
    }

    pub fn validate(&self) -> CredibilityResult<()> {
        if !is_valid_rating(self.rating) {
            return Err(CredibilityError::InvalidRating { value: self.rating });
        }
        if self.rater_id.eq_ignore_ascii_case(&self.rated_user_id) {
            return Err(CredibilityError::SelfRating {
                user_id: self.rater_id.clone(),
            });
        }
        Ok(())
    }

    /// `other` is the counterpart's rating of the same meeting.
    pub fn is_reciprocal_of(&self, other: &MeetingRating) -> bool {
        self.meeting_id.eq_ignore_ascii_case(&other.meeting_id)
            && self.rater_id.eq_ignore_ascii_case(&other.rated_user_id)
            && self.rated_user_id.eq_ignore_ascii_case(&other.rater_id)
    }

    /// Same meeting and same rater. A rater rates a meeting once.
    pub fn is_same_submission(&self, other: &MeetingRating) -> bool {
        self.meeting_id.eq_ignore_ascii_case(&other.meeting_id)
            && self.rater_id.eq_ignore_ascii_case(&other.rater_id)
    }

    pub fn negative_tag_count(&self) -> usize {
        self.tags
            .iter()
            .filter(|t| t.category() == TagCategory::Negative)
            .count()
    }
}

fn truncate_comment(comment: String) -> String {
    match comment.char_indices().nth(MAX_COMMENT_CHARS) {
        Some((idx, _)) => comment[..idx].to_string(),
        None => comment,
    }
}
