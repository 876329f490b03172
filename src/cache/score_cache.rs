//! In-memory credibility score cache.
//!
//! Keys are user ids, lower-cased. Entries expire `ttl` after insertion as
//! measured by the injected [`Clock`]; an expired entry is evicted by the lookup
//! that finds it. Capacity eviction is left to moka.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use moka::ops::compute::{CompResult, Op};
use moka::sync::Cache;
use tracing::trace;

use super::clock::{Clock, SystemClock};
use super::types::{CacheLookup, CacheStatus, CachedScore};
use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS};
use crate::credibility::CredibilityScore;

/// Cache of [`CredibilityScore`] records with clock-driven TTL.
pub struct CredibilityScoreCache {
    entries: Cache<String, CachedScore>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CredibilityScoreCache {
    /// Default TTL and capacity on the system clock.
    pub fn new() -> Self {
        Self::with_clock(
            Duration::seconds(DEFAULT_CACHE_TTL_SECS as i64),
            DEFAULT_CACHE_CAPACITY,
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(ttl: Duration, capacity: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Fresh record for `user_id`, if any.
    #[inline]
    pub fn get(&self, user_id: &str) -> Option<CredibilityScore> {
        self.lookup(user_id).into_record()
    }

    /// Looks up a user, evicting the entry atomically if it has expired.
    pub fn lookup(&self, user_id: &str) -> CacheLookup {
        let key = cache_key(user_id);
        let now = self.clock.now();
        let ttl = self.ttl;

        let result = self.entries.entry(key).and_compute_with(|maybe_entry| match maybe_entry {
            Some(entry) if is_expired(entry.value(), now, ttl) => Op::Remove,
            _ => Op::Nop,
        });

        let lookup = match result {
            CompResult::Unchanged(entry) => CacheLookup {
                status: CacheStatus::Hit,
                record: Some(entry.into_value().record),
            },
            CompResult::Removed(_) => CacheLookup {
                status: CacheStatus::Expired,
                record: None,
            },
            CompResult::StillNone(_) | CompResult::Inserted(_) | CompResult::ReplacedWith(_) => {
                CacheLookup {
                    status: CacheStatus::Miss,
                    record: None,
                }
            }
        };

        if lookup.status.is_hit() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        trace!(user_id, status = %lookup.status, "Credibility cache lookup");
        lookup
    }

    /// Caches `record` for `user_id`, stamped with the current time. Replaces
    /// any existing entry.
    pub fn set(&self, user_id: &str, record: CredibilityScore) {
        let key = cache_key(user_id);
        let cached = CachedScore {
            record,
            cached_at: self.clock.now(),
        };
        self.entries.insert(key, cached);
    }

    /// Drops the entry for `user_id`. Returns whether one was present.
    pub fn invalidate(&self, user_id: &str) -> bool {
        self.entries.remove(&cache_key(user_id)).is_some()
    }

    #[inline]
    pub fn contains(&self, user_id: &str) -> bool {
        self.entries.contains_key(&cache_key(user_id))
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    #[inline]
    pub fn clear_all(&self) {
        self.entries.invalidate_all();
    }

    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hit rate over all lookups, 0.0 when nothing has been looked up.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl Default for CredibilityScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CredibilityScoreCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredibilityScoreCache")
            .field("entries", &self.entries.entry_count())
            .field("ttl_secs", &self.ttl.num_seconds())
            .field("clock", &self.clock)
            .finish()
    }
}

fn cache_key(user_id: &str) -> String {
    user_id.trim().to_lowercase()
}

fn is_expired(cached: &CachedScore, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - cached.cached_at >= ttl
}

#[derive(Clone)]
/// Shared handle to a [`CredibilityScoreCache`].
pub struct CredibilityCacheHandle {
    inner: Arc<CredibilityScoreCache>,
}

impl CredibilityCacheHandle {
    #[inline]
    pub fn new() -> Self {
        Self::from_cache(CredibilityScoreCache::new())
    }

    #[inline]
    pub fn from_cache(cache: CredibilityScoreCache) -> Self {
        Self {
            inner: Arc::new(cache),
        }
    }

    #[inline]
    pub fn with_clock(ttl: Duration, capacity: u64, clock: Arc<dyn Clock>) -> Self {
        Self::from_cache(CredibilityScoreCache::with_clock(ttl, capacity, clock))
    }

    #[inline]
    pub fn get(&self, user_id: &str) -> Option<CredibilityScore> {
        self.inner.get(user_id)
    }

    #[inline]
    pub fn lookup(&self, user_id: &str) -> CacheLookup {
        self.inner.lookup(user_id)
    }

    #[inline]
    pub fn set(&self, user_id: &str, record: CredibilityScore) {
        self.inner.set(user_id, record)
    }

    #[inline]
    pub fn invalidate(&self, user_id: &str) -> bool {
        self.inner.invalidate(user_id)
    }

    #[inline]
    pub fn contains(&self, user_id: &str) -> bool {
        self.inner.contains(user_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear_all(&self) {
        self.inner.clear_all();
    }

    #[inline]
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.inner.now()
    }

    #[inline]
    pub fn hit_rate(&self) -> f64 {
        self.inner.hit_rate()
    }

    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for CredibilityCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CredibilityCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredibilityCacheHandle")
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
