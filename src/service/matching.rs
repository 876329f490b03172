use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::ranking::{RankedCandidate, RankingCandidate, RankingOrchestrator};
use crate::store::ProfileStore;

use super::credibility::CredibilityService;
use super::error::{ServiceError, ServiceResult};

/// Resolves profiles and credibility, then ranks.
#[derive(Clone)]
pub struct MatchService {
    profiles: Arc<dyn ProfileStore>,
    credibility: CredibilityService,
    orchestrator: Arc<RankingOrchestrator>,
}

impl std::fmt::Debug for MatchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchService")
            .field("credibility", &self.credibility)
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl MatchService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        credibility: CredibilityService,
        orchestrator: Arc<RankingOrchestrator>,
    ) -> Self {
        Self {
            profiles,
            credibility,
            orchestrator,
        }
    }

    pub fn orchestrator(&self) -> &RankingOrchestrator {
        &self.orchestrator
    }

    /// Ranks `candidate_ids` for `requester_id`.
    ///
    /// Candidates without a profile, or whose credibility lookup failed, are
    /// skipped. `limit` overrides the orchestrator's configured limit.
    #[instrument(skip(self, candidate_ids), fields(candidates = candidate_ids.len()))]
    pub async fn rank_for(
        &self,
        requester_id: &str,
        candidate_ids: &[String],
        query: Option<&str>,
        limit: Option<usize>,
    ) -> ServiceResult<Vec<RankedCandidate>> {
        let requester = self
            .profiles
            .fetch_profile(requester_id)
            .await?
            .ok_or_else(|| ServiceError::RequesterNotFound {
                user_id: requester_id.to_string(),
            })?;

        let profiles = self.profiles.fetch_profiles(candidate_ids).await?;
        if profiles.len() < candidate_ids.len() {
            debug!(
                missing = candidate_ids.len() - profiles.len(),
                "Skipping candidates without a profile"
            );
        }

        let ids: Vec<String> = profiles.iter().map(|p| p.id.clone()).collect();
        let mut scores: HashMap<String, _> = self
            .credibility
            .scores_for(&ids)
            .await
            .into_iter()
            .map(|record| (record.user_id.to_lowercase(), record))
            .collect();

        let candidates: Vec<RankingCandidate> = profiles
            .into_iter()
            .filter_map(|profile| {
                let record = scores.remove(&profile.id.to_lowercase())?;
                Some(RankingCandidate::new(profile).with_credibility(record))
            })
            .collect();

        let now = self.credibility.cache().now();
        let limit = limit.unwrap_or(self.orchestrator.config().limit);
        Ok(self
            .orchestrator
            .rank_with_limit(&requester, candidates, query, now, limit))
    }
}
