use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RANKING_LIMIT;
use crate::credibility::{CredibilityScore, CredibilityTier};
use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A candidate profile with its credibility record, if one exists.
pub struct RankingCandidate {
    pub profile: Profile,
    #[serde(default)]
    pub credibility: Option<CredibilityScore>,
}

impl RankingCandidate {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            credibility: None,
        }
    }

    pub fn with_credibility(mut self, credibility: CredibilityScore) -> Self {
        self.credibility = Some(credibility);
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.profile.id
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A candidate whose credibility is still in persisted form.
pub struct RawCandidate {
    pub profile: Profile,
    /// Persisted credibility JSON; `None` means no record yet.
    pub record: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// How a candidate's final score was assembled.
pub struct ScoreBreakdown {
    /// Cosine similarity of the two embeddings, `[0, 1]`.
    pub similarity: f64,
    /// Flat bonus for shared concept tags.
    pub concept_bonus: f64,
    /// Tier multiplier.
    pub multiplier: f64,
    pub tier: CredibilityTier,
    /// `(similarity + concept_bonus) × multiplier`.
    pub final_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Ranked output row.
pub struct RankedCandidate {
    pub candidate_id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Why a candidate was left out of a ranking.
pub enum Exclusion {
    Requester,
    Banned,
    Frozen,
    ZeroWeight,
}

impl Exclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::Requester => "requester",
            Exclusion::Banned => "banned",
            Exclusion::Frozen => "frozen",
            Exclusion::ZeroWeight => "zero_weight",
        }
    }
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    /// Max candidates returned.
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

impl RankingConfig {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
