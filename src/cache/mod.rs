//! Credibility score cache and the clock it expires against.

pub mod clock;
pub mod score_cache;
pub mod types;


#[cfg(any(test, feature = "mock"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use score_cache::{CredibilityCacheHandle, CredibilityScoreCache};
pub use types::{CacheLookup, CacheStatus, CachedScore};
