//! Async orchestration over the store collaborators.

pub mod credibility;
pub mod error;
pub mod matching;


pub use credibility::{CredibilityService, DecaySummary};
pub use error::{ServiceError, ServiceResult};
pub use matching::MatchService;
