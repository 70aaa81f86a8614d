use thiserror::Error;

use chrono::NaiveDate;

/// Why a candidate stay interval was rejected before reaching the
/// overlap predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("date does not parse as a calendar date")]
    BadDate,
    #[error("check-out must be strictly after check-in")]
    NonPositiveDuration,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(#[from] IntervalError),

    #[error("Room {room_id} is not available for [{check_in}, {check_out})")]
    RoomUnavailable {
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Concurrent booking admission lost for room {room_id}")]
    ConcurrentModification { room_id: i32 },

    #[error("Store error: {0}")]
    Store(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Store(_) | DomainError::ConcurrentModification { .. }
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
