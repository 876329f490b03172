use thiserror::Error;

/// Errors from collaborator stores and the persistence codec.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Bytes were not valid JSON for the expected record.
    #[error("failed to decode {record}: {source}")]
    Decode {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Record decoded but violates an invariant.
    #[error("invalid {record} field '{field}': {reason}")]
    InvalidRecord {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("failed to encode {record}: {source}")]
    Encode {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A rating for the same meeting and rater is already stored.
    #[error("duplicate rating for meeting {meeting_id} by {rater_id}")]
    DuplicateRating { meeting_id: String, rater_id: String },

    /// The backing store failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
