use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCORE, MIN_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Discrete trust bracket, ordered from lowest to highest.
pub enum CredibilityTier {
    Banned,
    Critical,
    LowTrust,
    Alert,
    Caution,
    Normal,
    Trusted,
    WellTrusted,
    HighlyTrusted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Score range and policy effects of one tier.
pub struct TierRule {
    pub tier: CredibilityTier,
    /// Inclusive lower bound; the upper bound is the next rule's `min_score`.
    pub min_score: f64,
    /// Multiplier applied to the candidate's ranking score.
    pub matching_weight: f64,
    /// Daily swipe cap; `None` means unlimited.
    pub daily_swipe_limit: Option<u32>,
    /// Pro subscription price multiplier; `None` means not eligible.
    pub pro_price_multiplier: Option<f64>,
}

const fn rule(
    tier: CredibilityTier,
    min_score: f64,
    matching_weight: f64,
    daily_swipe_limit: Option<u32>,
    pro_price_multiplier: Option<f64>,
) -> TierRule {
    TierRule {
        tier,
        min_score,
        matching_weight,
        daily_swipe_limit,
        pro_price_multiplier,
    }
}

/// Product tier ladder, lowest first.
pub const DEFAULT_TIER_RULES: [TierRule; 9] = [
    rule(CredibilityTier::Banned, 0.0, 0.0, Some(0), None),
    rule(CredibilityTier::Critical, 0.6, 0.3, Some(1), Some(1.5)),
    rule(CredibilityTier::LowTrust, 1.1, 0.5, Some(1), Some(1.25)),
    rule(CredibilityTier::Alert, 1.6, 0.7, Some(3), Some(1.1)),
    rule(CredibilityTier::Caution, 2.1, 0.85, None, Some(1.0)),
    rule(CredibilityTier::Normal, 2.6, 1.0, None, Some(1.0)),
    rule(CredibilityTier::Trusted, 3.6, 1.2, None, Some(0.9)),
    rule(CredibilityTier::WellTrusted, 4.1, 1.4, None, Some(0.8)),
    rule(CredibilityTier::HighlyTrusted, 4.6, 1.6, None, Some(0.7)),
];

/// Fallback tier for scores outside `[0, 5]`.
pub const OUT_OF_RANGE_TIER: CredibilityTier = CredibilityTier::Normal;

impl CredibilityTier {
    pub const ALL: [CredibilityTier; 9] = [
        CredibilityTier::Banned,
        CredibilityTier::Critical,
        CredibilityTier::LowTrust,
        CredibilityTier::Alert,
        CredibilityTier::Caution,
        CredibilityTier::Normal,
        CredibilityTier::Trusted,
        CredibilityTier::WellTrusted,
        CredibilityTier::HighlyTrusted,
    ];

    /// Tier for `score` under the product ladder.
    pub fn from_score(score: f64) -> Self {
        tier_in(&DEFAULT_TIER_RULES, score)
    }

    /// Product-ladder rule for this tier.
    #[inline]
    pub fn rule(&self) -> &'static TierRule {
        &DEFAULT_TIER_RULES[*self as usize]
    }

    #[inline]
    pub fn matching_weight(&self) -> f64 {
        self.rule().matching_weight
    }

    #[inline]
    pub fn daily_swipe_limit(&self) -> Option<u32> {
        self.rule().daily_swipe_limit
    }

    #[inline]
    pub fn pro_price_multiplier(&self) -> Option<f64> {
        self.rule().pro_price_multiplier
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityTier::Banned => "banned",
            CredibilityTier::Critical => "critical",
            CredibilityTier::LowTrust => "low_trust",
            CredibilityTier::Alert => "alert",
            CredibilityTier::Caution => "caution",
            CredibilityTier::Normal => "normal",
            CredibilityTier::Trusted => "trusted",
            CredibilityTier::WellTrusted => "well_trusted",
            CredibilityTier::HighlyTrusted => "highly_trusted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CredibilityTier::Banned => "Banned",
            CredibilityTier::Critical => "Critical",
            CredibilityTier::LowTrust => "Low Trust",
            CredibilityTier::Alert => "Alert",
            CredibilityTier::Caution => "Caution",
            CredibilityTier::Normal => "Normal",
            CredibilityTier::Trusted => "Trusted",
            CredibilityTier::WellTrusted => "Well Trusted",
            CredibilityTier::HighlyTrusted => "Highly Trusted",
        }
    }
}

impl std::fmt::Display for CredibilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Configurable tier ladder. Rules are kept sorted by `min_score`.
pub struct TierTable {
    rules: Vec<TierRule>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_TIER_RULES.to_vec(),
        }
    }
}

impl TierTable {
    /// Builds a table from rules in any order.
    pub fn new(mut rules: Vec<TierRule>) -> Self {
        rules.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));
        Self { rules }
    }

    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// Tier whose range contains `score`. Out-of-range or NaN scores map to
    /// [`OUT_OF_RANGE_TIER`].
    pub fn tier_for(&self, score: f64) -> CredibilityTier {
        tier_in(&self.rules, score)
    }

    /// Rule for `tier`, falling back to the product ladder if the table omits it.
    pub fn rule(&self, tier: CredibilityTier) -> &TierRule {
        self.rules
            .iter()
            .find(|r| r.tier == tier)
            .unwrap_or_else(|| tier.rule())
    }

    /// Every tier appears exactly once and the ladder starts at the minimum score.
    pub fn is_complete(&self) -> bool {
        let starts_at_min = self.rules.first().is_some_and(|r| r.min_score <= MIN_SCORE);
        starts_at_min
            && self.rules.len() == CredibilityTier::ALL.len()
            && CredibilityTier::ALL
                .iter()
                .all(|t| self.rules.iter().filter(|r| r.tier == *t).count() == 1)
    }
}

fn tier_in(rules: &[TierRule], score: f64) -> CredibilityTier {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return OUT_OF_RANGE_TIER;
    }

    rules
        .iter()
        .rev()
        .find(|r| score >= r.min_score)
        .or_else(|| rules.first())
        .map(|r| r.tier)
        .unwrap_or(OUT_OF_RANGE_TIER)
}
