//! In-memory stores for tests and local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credibility::{AntiGamingPolicy, CredibilityScore, MeetingAggregates, MeetingRating};
use crate::profile::Profile;

use super::codec::{decode_credibility_record, encode_credibility_record};
use super::error::{StoreError, StoreResult};
use super::traits::{CredibilityStore, ProfileStore, RatingStore};

fn key(user_id: &str) -> String {
    user_id.trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, profile: Profile) {
        self.profiles.write().await.insert(key(&profile.id), profile);
    }

    pub async fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let store = Self::new();
        for profile in profiles {
            store.insert(profile).await;
        }
        store
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, user_id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&key(user_id)).cloned())
    }

    async fn fetch_profiles(&self, user_ids: &[String]) -> StoreResult<Vec<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| profiles.get(&key(id)).cloned())
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRatingStore {
    ratings: Arc<RwLock<Vec<MeetingRating>>>,
    no_shows: Arc<RwLock<HashMap<String, u32>>>,
    policy: AntiGamingPolicy,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AntiGamingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub async fn record_no_show(&self, user_id: &str) {
        *self.no_shows.write().await.entry(key(user_id)).or_insert(0) += 1;
    }

    pub async fn len(&self) -> usize {
        self.ratings.read().await.len()
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn store_rating(&self, rating: &MeetingRating) -> StoreResult<()> {
        let mut ratings = self.ratings.write().await;
        if ratings.iter().any(|r| r.is_same_submission(rating)) {
            return Err(StoreError::DuplicateRating {
                meeting_id: rating.meeting_id.clone(),
                rater_id: rating.rater_id.clone(),
            });
        }
        ratings.push(rating.clone());
        Ok(())
    }

    async fn meeting_aggregates(&self, user_id: &str) -> StoreResult<MeetingAggregates> {
        let received: Vec<MeetingRating> = self
            .ratings
            .read()
            .await
            .iter()
            .filter(|r| r.rated_user_id.eq_ignore_ascii_case(user_id))
            .cloned()
            .collect();
        let no_shows = self
            .no_shows
            .read()
            .await
            .get(&key(user_id))
            .copied()
            .unwrap_or(0);

        Ok(MeetingAggregates::from_ratings(&received, no_shows, &self.policy))
    }

    async fn ratings_for_meeting(&self, meeting_id: &str) -> StoreResult<Vec<MeetingRating>> {
        Ok(self
            .ratings
            .read()
            .await
            .iter()
            .filter(|r| r.meeting_id.eq_ignore_ascii_case(meeting_id))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
/// Holds records encoded, so every load goes through the codec.
pub struct MemoryCredibilityStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryCredibilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes as-is, bypassing the encoder.
    pub async fn insert_raw(&self, user_id: &str, bytes: Vec<u8>) {
        self.records.write().await.insert(key(user_id), bytes);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CredibilityStore for MemoryCredibilityStore {
    async fn load_score(&self, user_id: &str) -> StoreResult<Option<CredibilityScore>> {
        let records = self.records.read().await;
        records
            .get(&key(user_id))
            .map(|bytes| decode_credibility_record(bytes))
            .transpose()
    }

    async fn persist_score(&self, record: &CredibilityScore) -> StoreResult<()> {
        let bytes = encode_credibility_record(record)?;
        self.records.write().await.insert(key(&record.user_id), bytes);
        Ok(())
    }
}
