use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::concepts::{ConceptTagSet, ConceptTagger};
use crate::credibility::{CredibilityCalculator, CredibilityScore};
use crate::encoder::{Embedding, TwoTowerEncoder};
use crate::profile::Profile;
use crate::store::decode_credibility_record_with;

use super::types::{
    Exclusion, RankedCandidate, RankingCandidate, RankingConfig, RawCandidate, ScoreBreakdown,
};

/// Combines embedding similarity, concept overlap and credibility into one ordering.
///
/// Stateless after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RankingOrchestrator {
    encoder: TwoTowerEncoder,
    tagger: ConceptTagger,
    calculator: CredibilityCalculator,
    config: RankingConfig,
}

/// Requester-side state reused for every candidate.
struct RequesterContext {
    embedding: Embedding,
    query_tags: ConceptTagSet,
}

impl RankingOrchestrator {
    pub fn new(
        encoder: TwoTowerEncoder,
        tagger: ConceptTagger,
        calculator: CredibilityCalculator,
        config: RankingConfig,
    ) -> Self {
        Self {
            encoder,
            tagger,
            calculator,
            config,
        }
    }

    pub fn encoder(&self) -> &TwoTowerEncoder {
        &self.encoder
    }

    pub fn tagger(&self) -> &ConceptTagger {
        &self.tagger
    }

    pub fn calculator(&self) -> &CredibilityCalculator {
        &self.calculator
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Ranks `candidates` for `requester` with the configured limit.
    ///
    /// When `query` is given its concepts replace the requester's own tags.
    pub fn rank(
        &self,
        requester: &Profile,
        candidates: Vec<RankingCandidate>,
        query: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<RankedCandidate> {
        self.rank_with_limit(requester, candidates, query, now, self.config.limit)
    }

    pub fn rank_with_limit(
        &self,
        requester: &Profile,
        candidates: Vec<RankingCandidate>,
        query: Option<&str>,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<RankedCandidate> {
        let total = candidates.len();
        let context = self.requester_context(requester, query);

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .filter_map(|candidate| self.score_candidate(requester, &context, candidate, now))
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        ranked.truncate(limit);

        debug!(
            requester_id = %requester.id,
            candidates = total,
            returned = ranked.len(),
            query = query.unwrap_or(""),
            "Ranked candidates"
        );
        ranked
    }

    /// Like [`rank`](Self::rank) for candidates with persisted credibility JSON.
    /// A candidate whose record fails to decode is omitted.
    pub fn rank_records(
        &self,
        requester: &Profile,
        candidates: Vec<RawCandidate>,
        query: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<RankedCandidate> {
        let tiers = &self.calculator.policy().tiers;
        let decoded: Vec<RankingCandidate> = candidates
            .into_iter()
            .filter_map(|raw| {
                let credibility = match raw.record.as_deref() {
                    None => None,
                    Some(bytes) => match decode_credibility_record_with(bytes, tiers) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            warn!(
                                candidate_id = %raw.profile.id,
                                error = %e,
                                "Omitting candidate with undecodable credibility record"
                            );
                            return None;
                        }
                    },
                };
                Some(RankingCandidate {
                    profile: raw.profile,
                    credibility,
                })
            })
            .collect();

        self.rank(requester, decoded, query, now)
    }

    /// Scores one candidate, or `None` if it is excluded.
    pub fn score(
        &self,
        requester: &Profile,
        candidate: RankingCandidate,
        query: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<RankedCandidate> {
        let context = self.requester_context(requester, query);
        self.score_candidate(requester, &context, candidate, now)
    }

    /// Reason `candidate` would be excluded, if any.
    pub fn exclusion(
        &self,
        requester: &Profile,
        candidate_id: &str,
        record: &CredibilityScore,
        now: DateTime<Utc>,
    ) -> Option<Exclusion> {
        if requester.is_same_user(candidate_id) {
            Some(Exclusion::Requester)
        } else if record.is_banned {
            Some(Exclusion::Banned)
        } else if record.is_frozen_at(now) {
            Some(Exclusion::Frozen)
        } else if self.calculator.matching_weight(record) <= 0.0 {
            Some(Exclusion::ZeroWeight)
        } else {
            None
        }
    }

    fn requester_context(&self, requester: &Profile, query: Option<&str>) -> RequesterContext {
        let query_tags = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.tagger.map_query_to_concepts(q),
            None => self.tagger.generate_tags(requester),
        };

        RequesterContext {
            embedding: self.encoder.encode_and_embed(requester),
            query_tags,
        }
    }

    fn score_candidate(
        &self,
        requester: &Profile,
        context: &RequesterContext,
        candidate: RankingCandidate,
        now: DateTime<Utc>,
    ) -> Option<RankedCandidate> {
        let RankingCandidate {
            profile,
            credibility,
        } = candidate;
        let record = credibility.unwrap_or_else(|| CredibilityScore::new(profile.id.clone()));

        if let Some(reason) = self.exclusion(requester, &profile.id, &record, now) {
            trace!(candidate_id = %profile.id, %reason, "Excluded candidate");
            return None;
        }

        let tier = self.calculator.effective_tier(&record);
        let multiplier = self.calculator.tier_rule(tier).matching_weight;
        let embedding = self.encoder.encode_and_embed(&profile);
        let similarity = f64::from(self.encoder.similarity(&context.embedding, &embedding));
        let concept_bonus = self
            .tagger
            .score_concept_match(&self.tagger.generate_tags(&profile), &context.query_tags);
        let final_score = (similarity + concept_bonus) * multiplier;

        Some(RankedCandidate {
            candidate_id: profile.id,
            score: final_score,
            breakdown: ScoreBreakdown {
                similarity,
                concept_bonus,
                multiplier,
                tier,
                final_score,
            },
        })
    }
}
