//! Common API types shared by every module

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response envelope.
///
/// Every REST endpoint wraps its payload in this shape.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Map a domain error to the HTTP status + envelope it surfaces as.
pub fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidInterval(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_)
        | DomainError::RoomUnavailable { .. }
        | DomainError::ConcurrentModification { .. } => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IntervalError;

    #[test]
    fn envelope_shapes() {
        let ok = ApiResponse::success(42);
        assert!(ok.success);
        assert_eq!(ok.data, Some(42));
        assert!(ok.error.is_none());

        let err = ApiResponse::<()>::error("nope");
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("nope"));
    }

    #[test]
    fn status_mapping() {
        let (status, _) = error_response(DomainError::NotFound {
            entity: "Room",
            field: "id",
            value: "7".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(DomainError::RoomUnavailable {
            room_id: 7,
            check_in: "2025-12-25".parse().unwrap(),
            check_out: "2025-12-28".parse().unwrap(),
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) =
            error_response(DomainError::InvalidInterval(IntervalError::BadDate));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(DomainError::Store("down".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
