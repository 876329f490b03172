use thiserror::Error;

use crate::credibility::CredibilityError;
use crate::store::StoreError;

/// Errors from the async service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("credibility error: {0}")]
    Credibility(#[from] CredibilityError),

    /// The ranking requester has no profile.
    #[error("requester profile not found: {user_id}")]
    RequesterNotFound { user_id: String },
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
