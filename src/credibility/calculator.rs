use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::constants::{MAX_SCORE, MIN_SCORE, round_to_half};

use super::error::{CredibilityError, CredibilityResult};
use super::misconduct::{MisconductOutcome, MisconductReport};
use super::policy::CredibilityPolicy;
use super::rating::MeetingRating;
use super::record::{CredibilityScore, MeetingAggregates, is_verified_meeting};
use super::tier::{CredibilityTier, TierRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Anti-gaming findings for a single submitted rating.
pub struct RatingSignals {
    pub gps_anomaly: bool,
    pub mutual_high_rating: bool,
}

/// Pure scoring rules over a [`CredibilityPolicy`].
#[derive(Debug, Clone, Default)]
pub struct CredibilityCalculator {
    policy: CredibilityPolicy,
}

impl CredibilityCalculator {
    pub fn new(policy: CredibilityPolicy) -> CredibilityResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &CredibilityPolicy {
        &self.policy
    }

    /// Maps a fulfillment percentage to a 0.5..=5.0 score.
    pub fn fulfillment_score(&self, fulfillment_rate: f64) -> f64 {
        self.policy
            .fulfillment_steps
            .iter()
            .find(|step| fulfillment_rate >= step.min_rate)
            .map(|step| step.score)
            .unwrap_or(self.policy.fulfillment_floor)
    }

    /// `0.7 × average_rating + 0.3 × fulfillment_score`, rounded to the nearest 0.5.
    pub fn calculate_overall_score(&self, average_rating: f64, fulfillment_rate: f64) -> f64 {
        let rating = if average_rating.is_finite() {
            average_rating.clamp(MIN_SCORE, MAX_SCORE)
        } else {
            MIN_SCORE
        };
        let raw = self.policy.rating_weight * rating
            + self.policy.fulfillment_weight * self.fulfillment_score(fulfillment_rate);
        round_to_half(raw).clamp(MIN_SCORE, MAX_SCORE)
    }

    /// Percent of meetings attended. No meetings means 100.
    pub fn calculate_fulfillment_rate(&self, total_meetings: u32, no_shows: u32) -> f64 {
        if total_meetings == 0 {
            return 100.0;
        }
        let attended = total_meetings.saturating_sub(no_shows);
        attended as f64 / total_meetings as f64 * 100.0
    }

    /// Per-day decay rate for a score.
    pub fn decay_rate(&self, score: f64) -> f64 {
        self.policy
            .decay_brackets
            .iter()
            .find(|b| score >= b.min_score)
            .or_else(|| self.policy.decay_brackets.last())
            .map(|b| b.rate_per_day)
            .unwrap_or(0.0)
    }

    /// Inactivity decay. Below the threshold the score is returned unchanged;
    /// otherwise `rate × (days − threshold + 1)` is subtracted, floored and
    /// rounded to 0.5. Decay never raises a score.
    pub fn apply_decay(&self, score: f64, days_since_last_meeting: i64) -> f64 {
        let threshold = self.policy.decay_threshold_days;
        if days_since_last_meeting < threshold || score <= self.policy.decay_floor {
            return score;
        }

        let overdue_days = (days_since_last_meeting - (threshold - 1)) as f64;
        let decayed = score - self.decay_rate(score) * overdue_days;
        round_to_half(decayed.max(self.policy.decay_floor)).min(score)
    }

    pub fn tier_for(&self, score: f64) -> CredibilityTier {
        self.policy.tiers.tier_for(score)
    }

    /// Tier used for policy decisions: banned users are always banned,
    /// everyone else is derived from the score.
    pub fn effective_tier(&self, record: &CredibilityScore) -> CredibilityTier {
        if record.is_banned {
            CredibilityTier::Banned
        } else {
            self.tier_for(record.overall_score)
        }
    }

    pub fn tier_rule(&self, tier: CredibilityTier) -> &TierRule {
        self.policy.tiers.rule(tier)
    }

    /// Ranking multiplier for a record.
    pub fn matching_weight(&self, record: &CredibilityScore) -> f64 {
        self.tier_rule(self.effective_tier(record)).matching_weight
    }

    /// Whether the user may swipe again today.
    pub fn can_swipe(&self, record: &CredibilityScore, swipes_today: u32, now: DateTime<Utc>) -> bool {
        if record.is_banned || record.is_frozen_at(now) {
            return false;
        }
        match self.tier_rule(self.effective_tier(record)).daily_swipe_limit {
            Some(limit) => swipes_today < limit,
            None => true,
        }
    }

    /// Pro price multiplier; `None` when the user may not subscribe.
    pub fn pro_price_multiplier(&self, record: &CredibilityScore) -> Option<f64> {
        self.tier_rule(self.effective_tier(record)).pro_price_multiplier
    }

    /// Rebuilds a record from its meeting history, then applies decay and
    /// lifts an expired freeze. Banned records keep score 0.
    pub fn recompute(
        &self,
        record: &mut CredibilityScore,
        aggregates: &MeetingAggregates,
        now: DateTime<Utc>,
    ) {
        record.total_meetings = aggregates.total_meetings;
        record.total_no_shows = aggregates.total_no_shows.min(aggregates.total_meetings);
        record.fulfillment_rate =
            self.calculate_fulfillment_rate(record.total_meetings, record.total_no_shows);
        if let Some(avg) = aggregates.average_rating {
            record.average_rating = avg.clamp(MIN_SCORE, MAX_SCORE);
        }
        if aggregates.last_meeting_date > record.last_meeting_date {
            record.last_meeting_date = aggregates.last_meeting_date;
        }

        record.lift_expired_freeze(now);

        if record.is_banned {
            record.overall_score = MIN_SCORE;
            record.tier = CredibilityTier::Banned;
            return;
        }

        if record.total_meetings == 0 {
            debug!(user_id = %record.user_id, "No meeting history, keeping current score");
            return;
        }

        let score = self.decayed_score(record, now);
        debug!(
            user_id = %record.user_id,
            previous = record.overall_score,
            score,
            "Recomputed credibility score"
        );
        record.overall_score = score;
        record.tier = self.tier_for(score);
    }

    /// Re-applies inactivity decay from the base score. Idempotent for a fixed `now`.
    /// Returns whether the score changed.
    pub fn refresh_decay(&self, record: &mut CredibilityScore, now: DateTime<Utc>) -> bool {
        record.lift_expired_freeze(now);

        if record.is_banned || record.total_meetings == 0 || record.last_meeting_date.is_none() {
            return false;
        }

        let score = self.decayed_score(record, now);
        record.last_decay_date = Some(now);
        if score == record.overall_score {
            return false;
        }

        debug!(
            user_id = %record.user_id,
            from = record.overall_score,
            to = score,
            "Applied inactivity decay"
        );
        record.overall_score = score;
        record.tier = self.tier_for(score);
        true
    }

    /// Detects GPS anomalies and mutual high ratings for a submitted rating.
    /// `reciprocal` is ignored unless it is the counterpart's rating of the same meeting.
    pub fn assess_rating(
        &self,
        rating: &MeetingRating,
        reciprocal: Option<&MeetingRating>,
    ) -> RatingSignals {
        let policy = &self.policy.anti_gaming;
        let mutual_high_rating = reciprocal.is_some_and(|other| {
            rating.is_reciprocal_of(other)
                && rating.rating >= policy.mutual_high_rating_min
                && other.rating >= policy.mutual_high_rating_min
        });

        RatingSignals {
            gps_anomaly: !is_verified_meeting(rating, policy),
            mutual_high_rating,
        }
    }

    /// Folds rating signals into the rated user's record. Every
    /// `gps_anomaly_freeze_threshold`-th anomaly freezes the user.
    /// Returns the freeze end date when a freeze was applied.
    pub fn apply_rating_signals(
        &self,
        record: &mut CredibilityScore,
        signals: RatingSignals,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let policy = &self.policy.anti_gaming;

        if signals.mutual_high_rating {
            record.mutual_high_rating_count += 1;
            if record.mutual_high_rating_count == policy.mutual_high_rating_flag_threshold {
                warn!(
                    user_id = %record.user_id,
                    count = record.mutual_high_rating_count,
                    "Mutual high rating threshold reached"
                );
            }
        }

        if !signals.gps_anomaly {
            return None;
        }

        record.gps_anomaly_count += 1;
        if record.is_banned || record.gps_anomaly_count % policy.gps_anomaly_freeze_threshold != 0 {
            return None;
        }

        let until = now + Duration::days(policy.gps_anomaly_freeze_days);
        record.freeze(until);
        warn!(
            user_id = %record.user_id,
            anomalies = record.gps_anomaly_count,
            %until,
            "Froze user after repeated GPS anomalies"
        );
        Some(until)
    }

    /// Flagged for repeated mutual high ratings.
    pub fn is_gaming_suspected(&self, record: &CredibilityScore) -> bool {
        record.mutual_high_rating_count >= self.policy.anti_gaming.mutual_high_rating_flag_threshold
    }

    /// Applies the sanction for a verified report. Unverified reports change nothing.
    pub fn apply_verified_misconduct(
        &self,
        record: &mut CredibilityScore,
        report: &MisconductReport,
        now: DateTime<Utc>,
    ) -> CredibilityResult<MisconductOutcome> {
        if !record.user_id.eq_ignore_ascii_case(&report.reported_user_id) {
            return Err(CredibilityError::UserMismatch {
                expected: record.user_id.clone(),
                actual: report.reported_user_id.clone(),
            });
        }

        if !report.is_verified() {
            debug!(report_id = %report.report_id, status = %report.status, "Report not verified, ignoring");
            return Ok(MisconductOutcome::Ignored);
        }

        let severity = report.severity();
        let policy = &self.policy.misconduct;

        if severity >= policy.ban_severity {
            record.ban(format!("verified misconduct: {:?}", report.category));
            info!(user_id = %record.user_id, report_id = %report.report_id, severity, "Banned user");
            return Ok(MisconductOutcome::Banned);
        }

        if record.is_banned {
            return Ok(MisconductOutcome::Banned);
        }

        let days = (severity * policy.freeze_days_per_severity).ceil() as i64;
        let until = now + Duration::days(days);
        record.freeze(until);
        let until = record.freeze_end_date.unwrap_or(until);
        info!(user_id = %record.user_id, report_id = %report.report_id, severity, %until, "Froze user");
        Ok(MisconductOutcome::Frozen { until })
    }

    fn decayed_score(&self, record: &CredibilityScore, now: DateTime<Utc>) -> f64 {
        let mut average = record.average_rating;
        if self.is_gaming_suspected(record) {
            average = average.min(self.policy.anti_gaming.suspected_rating_cap);
        }
        let base = self.calculate_overall_score(average, record.fulfillment_rate);

        match record.last_meeting_date {
            Some(last) => self.apply_decay(base, (now - last).num_days()),
            None => base,
        }
    }
}
