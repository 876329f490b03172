//! Candidate ranking.
//!
//! ```text
//! score = (similarity(requester, candidate) + concept_bonus) × tier_multiplier
//! ```
//!
//! Banned, frozen and zero-weight candidates are dropped before scoring, as is
//! the requester. Ties break on candidate id so output is deterministic.

pub mod orchestrator;
pub mod types;


pub use orchestrator::RankingOrchestrator;
pub use types::{
    Exclusion, RankedCandidate, RankingCandidate, RankingConfig, RawCandidate, ScoreBreakdown,
};
