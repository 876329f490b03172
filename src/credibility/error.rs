use thiserror::Error;

use super::misconduct::ReportStatus;

/// Errors from credibility scoring and moderation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CredibilityError {
    /// Rating outside `[0.5, 5.0]` or not a multiple of 0.5.
    #[error("invalid rating {value}: must be 0.5..=5.0 in steps of 0.5")]
    InvalidRating {
        /// Rejected value.
        value: f64,
    },

    /// A user tried to rate themselves.
    #[error("user {user_id} cannot rate themselves")]
    SelfRating {
        /// Offending user.
        user_id: String,
    },

    /// The rater already rated this meeting.
    #[error("rating for meeting {meeting_id} by {rater_id} already exists")]
    DuplicateRating {
        meeting_id: String,
        rater_id: String,
    },

    /// Report status change not allowed by the review workflow.
    #[error("invalid report status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: ReportStatus,
        /// Requested status.
        to: ReportStatus,
    },

    /// Report or rating targets a different user than the record.
    #[error("record belongs to {expected} but the event targets {actual}")]
    UserMismatch {
        /// Record owner.
        expected: String,
        /// Event target.
        actual: String,
    },

    /// Policy tables are inconsistent.
    #[error("invalid credibility policy: {reason}")]
    InvalidPolicy {
        /// Details.
        reason: String,
    },
}

/// Result type for credibility operations.
pub type CredibilityResult<T> = Result<T, CredibilityError>;
