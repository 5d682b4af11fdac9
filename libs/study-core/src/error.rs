//! Error types for study-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised when a session fact violates the data contract.
///
/// These are rejected at the ingestion boundary; the scheduling
/// algorithms never clamp or repair out-of-range values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("confidence_before {value} outside 1-10")]
    ConfidenceBeforeOutOfRange { value: i32 },

    #[error("confidence_after {value} outside 1-10")]
    ConfidenceAfterOutOfRange { value: i32 },

    #[error("negative duration of {minutes} minutes")]
    NegativeDuration { minutes: i64 },
}
