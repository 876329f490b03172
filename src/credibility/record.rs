use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CREDIBILITY_SCORE, MAX_SCORE, MIN_SCORE};

use super::policy::AntiGamingPolicy;
use super::rating::MeetingRating;
use super::tier::CredibilityTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Persisted credibility state of one user.
///
/// `tier` always reflects `overall_score`; a banned user carries score 0 and
/// the banned tier.
pub struct CredibilityScore {
    pub user_id: String,
    pub overall_score: f64,
    pub tier: CredibilityTier,
    pub total_meetings: u32,
    pub total_no_shows: u32,
    /// Percent of meetings attended, 0..=100.
    pub fulfillment_rate: f64,
    pub average_rating: f64,
    pub last_meeting_date: Option<DateTime<Utc>>,
    pub last_decay_date: Option<DateTime<Utc>>,
    pub is_frozen: bool,
    pub freeze_end_date: Option<DateTime<Utc>>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub gps_anomaly_count: u32,
    pub mutual_high_rating_count: u32,
}

impl Default for CredibilityScore {
    fn default() -> Self {
        Self::new("")
    }
}

impl CredibilityScore {
    /// Record for a user with no history: score 3.0, tier normal.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            overall_score: DEFAULT_CREDIBILITY_SCORE,
            tier: CredibilityTier::from_score(DEFAULT_CREDIBILITY_SCORE),
            total_meetings: 0,
            total_no_shows: 0,
            fulfillment_rate: 100.0,
            average_rating: DEFAULT_CREDIBILITY_SCORE,
            last_meeting_date: None,
            last_decay_date: None,
            is_frozen: false,
            freeze_end_date: None,
            is_banned: false,
            ban_reason: None,
            gps_anomaly_count: 0,
            mutual_high_rating_count: 0,
        }
    }

    /// Sets the score and re-derives the tier from the product ladder.
    pub fn with_score(mut self, score: f64) -> Self {
        self.overall_score = score;
        self.tier = CredibilityTier::from_score(score);
        self
    }

    /// Frozen at `now`. A freeze without an end date is indefinite.
    pub fn is_frozen_at(&self, now: DateTime<Utc>) -> bool {
        self.is_frozen && self.freeze_end_date.is_none_or(|end| end > now)
    }

    /// Freezes until `until`, never shortening an existing freeze.
    pub fn freeze(&mut self, until: DateTime<Utc>) {
        let extends = match (self.is_frozen, self.freeze_end_date) {
            (true, None) => false,
            (true, Some(end)) => until > end,
            (false, _) => true,
        };
        if extends {
            self.is_frozen = true;
            self.freeze_end_date = Some(until);
        }
    }

    /// Clears a freeze whose end date has passed. Returns whether it was lifted.
    pub fn lift_expired_freeze(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_frozen
            && let Some(end) = self.freeze_end_date
            && end <= now
        {
            self.is_frozen = false;
            self.freeze_end_date = None;
            return true;
        }
        false
    }

    /// Terminal state: score 0, banned tier, freeze cleared.
    pub fn ban(&mut self, reason: impl Into<String>) {
        self.is_banned = true;
        self.ban_reason = Some(reason.into());
        self.overall_score = MIN_SCORE;
        self.tier = CredibilityTier::Banned;
        self.is_frozen = false;
        self.freeze_end_date = None;
    }

    /// Checks the record invariants: score range, tier consistency and ban state.
    pub fn is_consistent(&self) -> bool {
        let in_range = self.overall_score.is_finite()
            && (MIN_SCORE..=MAX_SCORE).contains(&self.overall_score);
        let ban_ok = !self.is_banned || self.tier == CredibilityTier::Banned;
        let rate_ok = (0.0..=100.0).contains(&self.fulfillment_rate);
        in_range && ban_ok && rate_ok
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Meeting history summary fed into a recompute.
pub struct MeetingAggregates {
    pub total_meetings: u32,
    pub total_no_shows: u32,
    /// `None` when no ratings exist yet.
    pub average_rating: Option<f64>,
    pub last_meeting_date: Option<DateTime<Utc>>,
    /// Sum of `rating × weight` over received ratings.
    #[serde(default)]
    pub weighted_rating_sum: f64,
    /// Sum of rating weights.
    #[serde(default)]
    pub rating_weight: f64,
}

impl MeetingAggregates {
    /// Summarizes received ratings. Every rating counts as one attended meeting
    /// and no-shows are added on top. Unverified ratings are down-weighted.
    pub fn from_ratings(
        ratings: &[MeetingRating],
        total_no_shows: u32,
        policy: &AntiGamingPolicy,
    ) -> Self {
        let empty = Self {
            total_meetings: total_no_shows,
            total_no_shows,
            ..Self::default()
        };
        ratings
            .iter()
            .fold(empty, |aggregates, rating| aggregates.with_rating(rating, policy))
    }

    /// Folds one more received rating into the summary.
    pub fn with_rating(mut self, rating: &MeetingRating, policy: &AntiGamingPolicy) -> Self {
        // Summaries built elsewhere may only carry the average.
        if self.rating_weight <= 0.0
            && let Some(avg) = self.average_rating
        {
            self.rating_weight = f64::from(self.total_meetings.saturating_sub(self.total_no_shows));
            self.weighted_rating_sum = avg * self.rating_weight;
        }

        let weight = if is_verified_meeting(rating, policy) {
            1.0
        } else {
            policy.unverified_rating_weight
        };
        self.weighted_rating_sum += rating.rating * weight;
        self.rating_weight += weight;
        self.average_rating =
            (self.rating_weight > 0.0).then(|| self.weighted_rating_sum / self.rating_weight);
        self.total_meetings = self.total_meetings.saturating_add(1);
        self.last_meeting_date = Some(match self.last_meeting_date {
            Some(prev) if prev >= rating.created_at => prev,
            _ => rating.created_at,
        });
        self
    }
}

/// GPS verified and long enough to count as a real meeting.
pub fn is_verified_meeting(rating: &MeetingRating, policy: &AntiGamingPolicy) -> bool {
    rating.gps_verified && rating.duration_seconds >= policy.min_verified_duration_secs
}
