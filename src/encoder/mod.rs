//! Two-tower profile encoder.
//!
//! `Profile` → [`FeatureVector`] (one-hot / multi-hot segments plus three scalars) →
//! [`Embedding`] (hashed projection, L2-normalized) → cosine similarity.
//!
//! There are no learned weights: the same profile always maps to the same embedding.

pub mod config;
pub mod error;
pub mod two_tower;
pub mod types;


pub use config::{DEFAULT_EMBEDDING_DIM, DEFAULT_YEARS_CAP, EncoderConfig};
pub use error::{EncoderError, EncoderResult};
pub use two_tower::{TwoTowerEncoder, try_cosine_similarity};
pub use types::{Embedding, FeatureLayout, FeatureVector, SEGMENT_ORDER, SegmentSpan, SimilarityHit};
