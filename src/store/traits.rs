use async_trait::async_trait;

use crate::credibility::{CredibilityScore, MeetingAggregates, MeetingRating};
use crate::profile::Profile;

use super::error::StoreResult;

#[async_trait]
/// Read access to user profiles.
pub trait ProfileStore: Send + Sync {
    /// Returns `None` when the profile does not exist.
    async fn fetch_profile(&self, user_id: &str) -> StoreResult<Option<Profile>>;
    /// Profiles that exist among `user_ids`, in request order. Missing ids are omitted.
    async fn fetch_profiles(&self, user_ids: &[String]) -> StoreResult<Vec<Profile>>;
}

#[async_trait]
/// Meeting history and submitted ratings.
pub trait RatingStore: Send + Sync {
    /// Appends a rating. A second rating of the same meeting by the same
    /// rater is [`StoreError::DuplicateRating`](super::StoreError::DuplicateRating).
    async fn store_rating(&self, rating: &MeetingRating) -> StoreResult<()>;
    /// Ratings received by `user_id`, summarized.
    async fn meeting_aggregates(&self, user_id: &str) -> StoreResult<MeetingAggregates>;
    /// Both sides' ratings of a meeting.
    async fn ratings_for_meeting(&self, meeting_id: &str) -> StoreResult<Vec<MeetingRating>>;
}

#[async_trait]
/// Durable credibility records.
pub trait CredibilityStore: Send + Sync {
    async fn load_score(&self, user_id: &str) -> StoreResult<Option<CredibilityScore>>;
    async fn persist_score(&self, record: &CredibilityScore) -> StoreResult<()>;
}
