//! Collaborator boundary: async store traits and the persistence codec.

pub mod codec;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod memory;
pub mod traits;


pub use codec::{
    decode_credibility_record, decode_credibility_record_with, decode_meeting_rating,
    encode_credibility_record, encode_meeting_rating,
};
pub use error::{StoreError, StoreResult};
#[cfg(any(test, feature = "mock"))]
pub use memory::{MemoryCredibilityStore, MemoryProfileStore, MemoryRatingStore};
pub use traits::{CredibilityStore, ProfileStore, RatingStore};
