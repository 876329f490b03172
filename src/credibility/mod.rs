//! Credibility scoring, trust tiers and moderation.
//!
//! A user's [`CredibilityScore`] is rebuilt from meeting history by the
//! [`CredibilityCalculator`]: a weighted blend of average rating and attendance,
//! rounded to half points, decayed during inactivity, and mapped onto the
//! [`CredibilityTier`] ladder. Verified misconduct freezes or bans; anti-gaming
//! signals come from unverified meetings and mutual high ratings.

pub mod calculator;
pub mod error;
pub mod misconduct;
pub mod policy;
pub mod rating;
pub mod record;
pub mod tier;

#[cfg(test)]
mod tests;

pub use calculator::{CredibilityCalculator, RatingSignals};
pub use error::{CredibilityError, CredibilityResult};
pub use misconduct::{MisconductCategory, MisconductOutcome, MisconductReport, ReportStatus};
pub use policy::{AntiGamingPolicy, CredibilityPolicy, DecayBracket, FulfillmentStep, MisconductPolicy};
pub use rating::{MeetingRating, RatingTag, TagCategory, is_valid_rating};
pub use record::{CredibilityScore, MeetingAggregates, is_verified_meeting};
pub use tier::{CredibilityTier, DEFAULT_TIER_RULES, OUT_OF_RANGE_TIER, TierRule, TierTable};
