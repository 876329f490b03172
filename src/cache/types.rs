use chrono::{DateTime, Utc};

use crate::credibility::CredibilityScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Outcome of a cache lookup.
pub enum CacheStatus {
    Hit,
    /// Entry existed but was older than the TTL and has been evicted.
    Expired,
    Miss,
}

impl CacheStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Expired => "EXPIRED",
            CacheStatus::Miss => "MISS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A credibility record plus the time it was cached.
pub struct CachedScore {
    pub record: CredibilityScore,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of [`CredibilityScoreCache::lookup`](super::CredibilityScoreCache::lookup).
pub struct CacheLookup {
    pub status: CacheStatus,
    pub record: Option<CredibilityScore>,
}

impl CacheLookup {
    #[inline]
    pub fn into_record(self) -> Option<CredibilityScore> {
        self.record
    }
}
