//! Tunable tables behind the credibility calculator.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DECAY_FLOOR, DEFAULT_DECAY_THRESHOLD_DAYS, FULFILLMENT_WEIGHT, MAX_SCORE, RATING_WEIGHT,
};

use super::error::{CredibilityError, CredibilityResult};
use super::tier::TierTable;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Daily decay rate for scores at or above `min_score`.
pub struct DecayBracket {
    pub min_score: f64,
    pub rate_per_day: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Fulfillment rate (percent) at or above `min_rate` maps to `score`.
pub struct FulfillmentStep {
    pub min_rate: f64,
    pub score: f64,
}

const DEFAULT_DECAY_BRACKETS: [DecayBracket; 6] = [
    DecayBracket { min_score: 4.5, rate_per_day: 0.08 },
    DecayBracket { min_score: 4.0, rate_per_day: 0.06 },
    DecayBracket { min_score: 3.5, rate_per_day: 0.04 },
    DecayBracket { min_score: 3.0, rate_per_day: 0.03 },
    DecayBracket { min_score: 2.5, rate_per_day: 0.02 },
    DecayBracket { min_score: 0.0, rate_per_day: 0.01 },
];

const DEFAULT_FULFILLMENT_STEPS: [FulfillmentStep; 9] = [
    FulfillmentStep { min_rate: 95.0, score: 5.0 },
    FulfillmentStep { min_rate: 90.0, score: 4.5 },
    FulfillmentStep { min_rate: 85.0, score: 4.0 },
    FulfillmentStep { min_rate: 80.0, score: 3.5 },
    FulfillmentStep { min_rate: 70.0, score: 3.0 },
    FulfillmentStep { min_rate: 60.0, score: 2.5 },
    FulfillmentStep { min_rate: 50.0, score: 2.0 },
    FulfillmentStep { min_rate: 40.0, score: 1.5 },
    FulfillmentStep { min_rate: 30.0, score: 1.0 },
];

const DEFAULT_FULFILLMENT_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Thresholds for GPS anomalies and mutual high ratings.
pub struct AntiGamingPolicy {
    /// Meetings shorter than this are treated as unverified.
    pub min_verified_duration_secs: u32,
    /// Anomalies that trigger a freeze (every multiple triggers again).
    pub gps_anomaly_freeze_threshold: u32,
    pub gps_anomaly_freeze_days: i64,
    /// Both sides rating at least this counts as a mutual high rating.
    pub mutual_high_rating_min: f64,
    /// Mutual high ratings after which the user is flagged.
    pub mutual_high_rating_flag_threshold: u32,
    /// Average rating ceiling applied to flagged users.
    pub suspected_rating_cap: f64,
    /// Weight of unverified ratings in the average.
    pub unverified_rating_weight: f64,
}

impl Default for AntiGamingPolicy {
    fn default() -> Self {
        Self {
            min_verified_duration_secs: 300,
            gps_anomaly_freeze_threshold: 3,
            gps_anomaly_freeze_days: 7,
            mutual_high_rating_min: 4.5,
            mutual_high_rating_flag_threshold: 5,
            suspected_rating_cap: 4.0,
            unverified_rating_weight: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// How verified misconduct is turned into sanctions.
pub struct MisconductPolicy {
    /// Severity at or above this bans the user.
    pub ban_severity: f64,
    /// Freeze length is `ceil(severity × freeze_days_per_severity)`.
    pub freeze_days_per_severity: f64,
}

impl Default for MisconductPolicy {
    fn default() -> Self {
        Self {
            ban_severity: 4.0,
            freeze_days_per_severity: 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Every table the calculator reads.
pub struct CredibilityPolicy {
    pub rating_weight: f64,
    pub fulfillment_weight: f64,
    /// Sorted by `min_rate`, highest first.
    pub fulfillment_steps: Vec<FulfillmentStep>,
    /// Score for rates below every step.
    pub fulfillment_floor: f64,
    /// Decay starts once this many days have passed since the last meeting.
    pub decay_threshold_days: i64,
    /// Sorted by `min_score`, highest first.
    pub decay_brackets: Vec<DecayBracket>,
    pub decay_floor: f64,
    pub tiers: TierTable,
    pub anti_gaming: AntiGamingPolicy,
    pub misconduct: MisconductPolicy,
}

impl Default for CredibilityPolicy {
    fn default() -> Self {
        Self {
            rating_weight: RATING_WEIGHT,
            fulfillment_weight: FULFILLMENT_WEIGHT,
            fulfillment_steps: DEFAULT_FULFILLMENT_STEPS.to_vec(),
            fulfillment_floor: DEFAULT_FULFILLMENT_FLOOR,
            decay_threshold_days: DEFAULT_DECAY_THRESHOLD_DAYS,
            decay_brackets: DEFAULT_DECAY_BRACKETS.to_vec(),
            decay_floor: DECAY_FLOOR,
            tiers: TierTable::default(),
            anti_gaming: AntiGamingPolicy::default(),
            misconduct: MisconductPolicy::default(),
        }
    }
}

impl CredibilityPolicy {
    pub fn with_decay_threshold_days(mut self, days: i64) -> Self {
        self.decay_threshold_days = days;
        self
    }

    pub fn with_tiers(mut self, tiers: TierTable) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn with_anti_gaming(mut self, anti_gaming: AntiGamingPolicy) -> Self {
        self.anti_gaming = anti_gaming;
        self
    }

    /// Rejects tables the calculator cannot use consistently.
    pub fn validate(&self) -> CredibilityResult<()> {
        let weight_sum = self.rating_weight + self.fulfillment_weight;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(invalid(format!(
                "rating_weight + fulfillment_weight must be 1.0, got {}",
                weight_sum
            )));
        }

        if self.decay_threshold_days < 1 {
            return Err(invalid("decay_threshold_days must be at least 1"));
        }

        if !(0.0..=MAX_SCORE).contains(&self.decay_floor) {
            return Err(invalid("decay_floor must be within the score range"));
        }

        if self.decay_brackets.is_empty() {
            return Err(invalid("decay_brackets must not be empty"));
        }
        if !is_descending(self.decay_brackets.iter().map(|b| b.min_score)) {
            return Err(invalid("decay_brackets must be sorted by min_score, highest first"));
        }
        if self.decay_brackets.iter().any(|b| b.rate_per_day < 0.0) {
            return Err(invalid("decay rates must not be negative"));
        }

        if !is_descending(self.fulfillment_steps.iter().map(|s| s.min_rate)) {
            return Err(invalid("fulfillment_steps must be sorted by min_rate, highest first"));
        }

        if !self.tiers.is_complete() {
            return Err(invalid("tier table must list every tier once, starting at 0"));
        }

        if self.anti_gaming.gps_anomaly_freeze_threshold == 0
            || self.anti_gaming.mutual_high_rating_flag_threshold == 0
        {
            return Err(invalid("anti-gaming thresholds must be positive"));
        }

        if self.misconduct.freeze_days_per_severity <= 0.0 {
            return Err(invalid("freeze_days_per_severity must be positive"));
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> CredibilityError {
    CredibilityError::InvalidPolicy {
        reason: reason.into(),
    }
}

fn is_descending(values: impl Iterator<Item = f64>) -> bool {
    let values: Vec<f64> = values.collect();
    values.windows(2).all(|w| w[0] > w[1])
}
