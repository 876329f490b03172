use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::cache::CredibilityCacheHandle;
use crate::credibility::{
    CredibilityCalculator, CredibilityError, CredibilityScore, MeetingRating, MisconductOutcome,
    MisconductReport, RatingSignals,
};
use crate::store::{CredibilityStore, RatingStore};

use super::error::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Outcome of a [`CredibilityService::run_decay`] sweep.
pub struct DecaySummary {
    pub examined: usize,
    pub decayed: usize,
    pub failed: usize,
}

/// Read-through credibility access plus the write paths that change a score.
///
/// Time comes from the cache's clock so expiry and decay agree.
#[derive(Clone)]
pub struct CredibilityService {
    calculator: Arc<CredibilityCalculator>,
    cache: CredibilityCacheHandle,
    ratings: Arc<dyn RatingStore>,
    scores: Arc<dyn CredibilityStore>,
}

impl std::fmt::Debug for CredibilityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredibilityService")
            .field("calculator", &self.calculator)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CredibilityService {
    pub fn new(
        calculator: CredibilityCalculator,
        cache: CredibilityCacheHandle,
        ratings: Arc<dyn RatingStore>,
        scores: Arc<dyn CredibilityStore>,
    ) -> Self {
        Self {
            calculator: Arc::new(calculator),
            cache,
            ratings,
            scores,
        }
    }

    pub fn calculator(&self) -> &CredibilityCalculator {
        &self.calculator
    }

    pub fn cache(&self) -> &CredibilityCacheHandle {
        &self.cache
    }

    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.cache.now()
    }

    /// Cache, then store, then a lazily created default record. Decay is
    /// refreshed on a store read and the record is cached.
    #[instrument(skip(self))]
    pub async fn score_for(&self, user_id: &str) -> ServiceResult<CredibilityScore> {
        if let Some(record) = self.cache.get(user_id) {
            return Ok(record);
        }

        let now = self.now();
        let record = match self.scores.load_score(user_id).await? {
            Some(mut record) => {
                if self.calculator.refresh_decay(&mut record, now) {
                    self.scores.persist_score(&record).await?;
                }
                record
            }
            None => {
                debug!(user_id, "Creating default credibility record");
                let record = CredibilityScore::new(user_id);
                self.scores.persist_score(&record).await?;
                record
            }
        };

        self.cache.set(user_id, record.clone());
        Ok(record)
    }

    /// Records for `user_ids`; users whose lookup fails are omitted and logged.
    pub async fn scores_for(&self, user_ids: &[String]) -> Vec<CredibilityScore> {
        let mut records = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            match self.score_for(user_id).await {
                Ok(record) => records.push(record),
                Err(e) => warn!(user_id = %user_id, error = %e, "Credibility lookup failed, omitting user"),
            }
        }
        records
    }

    /// Stores a rating and rebuilds the rated user's score.
    ///
    /// A rater rates a meeting once; a second submission is
    /// [`CredibilityError::DuplicateRating`]. Without an explicit `reciprocal`,
    /// the counterpart's rating of the same meeting is looked up. A mutual high
    /// rating counts against both users.
    ///
    /// Every record involved is loaded and the new score computed before
    /// anything is written, so a failed read leaves the stores untouched.
    #[instrument(skip(self, rating, reciprocal), fields(meeting_id = %rating.meeting_id, rated_user_id = %rating.rated_user_id))]
    pub async fn submit_rating(
        &self,
        rating: MeetingRating,
        reciprocal: Option<MeetingRating>,
    ) -> ServiceResult<CredibilityScore> {
        rating.validate()?;
        let now = self.now();

        let same_meeting = self.ratings.ratings_for_meeting(&rating.meeting_id).await?;
        if same_meeting.iter().any(|other| other.is_same_submission(&rating)) {
            warn!(rater_id = %rating.rater_id, "Duplicate rating rejected");
            return Err(CredibilityError::DuplicateRating {
                meeting_id: rating.meeting_id.clone(),
                rater_id: rating.rater_id.clone(),
            }
            .into());
        }

        let reciprocal = reciprocal
            .filter(|other| rating.is_reciprocal_of(other))
            .or_else(|| {
                same_meeting
                    .into_iter()
                    .find(|other| rating.is_reciprocal_of(other))
            });
        let signals = self.calculator.assess_rating(&rating, reciprocal.as_ref());

        let mut record = self.load_or_default(&rating.rated_user_id).await?;
        let mut rater = if signals.mutual_high_rating {
            Some(self.load_or_default(&rating.rater_id).await?)
        } else {
            None
        };
        let aggregates = self
            .ratings
            .meeting_aggregates(&rating.rated_user_id)
            .await?
            .with_rating(&rating, &self.calculator.policy().anti_gaming);

        self.calculator.apply_rating_signals(&mut record, signals, now);
        self.calculator.recompute(&mut record, &aggregates, now);
        if let Some(rater) = rater.as_mut() {
            let mutual_only = RatingSignals {
                gps_anomaly: false,
                mutual_high_rating: true,
            };
            self.calculator.apply_rating_signals(rater, mutual_only, now);
        }

        self.ratings.store_rating(&rating).await?;
        self.store_and_refresh(&record).await?;
        if let Some(rater) = rater {
            self.store_and_refresh(&rater).await?;
        }

        debug!(score = record.overall_score, tier = %record.tier, "Rating applied");
        Ok(record)
    }

    /// Applies a reviewed report. Unverified reports leave the record as is.
    #[instrument(skip(self, report), fields(report_id = %report.report_id, reported_user_id = %report.reported_user_id))]
    pub async fn apply_misconduct(&self, report: &MisconductReport) -> ServiceResult<MisconductOutcome> {
        let mut record = self.load_or_default(&report.reported_user_id).await?;
        let outcome = self
            .calculator
            .apply_verified_misconduct(&mut record, report, self.now())?;

        if outcome != MisconductOutcome::Ignored {
            self.scores.persist_score(&record).await?;
        }
        self.cache.invalidate(&report.reported_user_id);
        Ok(outcome)
    }

    /// Re-applies inactivity decay to stored records. Missing users are skipped.
    #[instrument(skip(self, user_ids), fields(users = user_ids.len()))]
    pub async fn run_decay(&self, user_ids: &[String]) -> DecaySummary {
        let now = self.now();
        let mut summary = DecaySummary::default();

        for user_id in user_ids {
            summary.examined += 1;
            let result = async {
                let Some(mut record) = self.scores.load_score(user_id).await? else {
                    return Ok(false);
                };
                if !self.calculator.refresh_decay(&mut record, now) {
                    return Ok(false);
                }
                self.scores.persist_score(&record).await?;
                self.cache.invalidate(user_id);
                ServiceResult::Ok(true)
            }
            .await;

            match result {
                Ok(true) => summary.decayed += 1,
                Ok(false) => {}
                Err(e) => {
                    summary.failed += 1;
                    warn!(user_id = %user_id, error = %e, "Decay failed");
                }
            }
        }

        info!(
            examined = summary.examined,
            decayed = summary.decayed,
            failed = summary.failed,
            "Decay sweep finished"
        );
        summary
    }

    async fn load_or_default(&self, user_id: &str) -> ServiceResult<CredibilityScore> {
        Ok(self
            .scores
            .load_score(user_id)
            .await?
            .unwrap_or_else(|| CredibilityScore::new(user_id)))
    }

    async fn store_and_refresh(&self, record: &CredibilityScore) -> ServiceResult<()> {
        self.scores.persist_score(record).await?;
        self.cache.invalidate(&record.user_id);
        self.cache.set(&record.user_id, record.clone());
        Ok(())
    }
}
