//! Authentication middleware for Axum
//!
//! Validates the JWT bearer token, resolves the staff member's role,
//! and stores an [`AuthenticatedStaff`] in request extensions. The
//! client only ever holds an opaque token; authorization is decided
//! server-side from the closed role/capability table.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::staff::{Capability, StaffRole};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    UnknownRole,
}

/// Authentication state for the middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated staff information extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedStaff {
    pub staff_id: i32,
    pub username: String,
    pub role: StaffRole,
}

impl AuthenticatedStaff {
    pub fn from_claims(claims: &TokenClaims) -> Option<Self> {
        Some(Self {
            staff_id: claims.sub.parse().ok()?,
            username: claims.username.clone(),
            role: StaffRole::from_str(&claims.role)?,
        })
    }

    pub fn can(&self, cap: Capability) -> bool {
        self.role.has_capability(cap)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let Some(staff) = AuthenticatedStaff::from_claims(&claims) else {
                return auth_error_response(AuthError::UnknownRole);
            };
            request.extensions_mut().insert(staff);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Capability gate used inside handlers:
///
/// ```ignore
/// require(&staff, Capability::ManageStaff)?;
/// ```
pub fn require(
    staff: &AuthenticatedStaff,
    cap: Capability,
) -> Result<(), (StatusCode, Json<ApiResponse<()>>)> {
    if staff.can(cap) {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(format!(
                "Role {} lacks the {:?} capability",
                staff.role, cap
            ))),
        ))
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::UnknownRole => (StatusCode::UNAUTHORIZED, "Token carries an unknown role"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::create_token;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test".into(),
            expiration_hours: 1,
            issuer: "brightstay-hms".into(),
        }
    }

    #[test]
    fn claims_resolve_to_staff() {
        let cfg = jwt_config();
        let token = create_token(3, "maria", "manager", &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();
        let staff = AuthenticatedStaff::from_claims(&claims).unwrap();
        assert_eq!(staff.staff_id, 3);
        assert_eq!(staff.role, StaffRole::Manager);
        assert!(staff.can(Capability::ManageBookings));
        assert!(!staff.can(Capability::ManageStaff));
    }

    #[test]
    fn unknown_role_claims_rejected() {
        let cfg = jwt_config();
        let token = create_token(3, "maria", "sysadmin", &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();
        assert!(AuthenticatedStaff::from_claims(&claims).is_none());
    }

    #[test]
    fn require_enforces_capability() {
        let staff = AuthenticatedStaff {
            staff_id: 1,
            username: "clerk".into(),
            role: StaffRole::Receptionist,
        };
        assert!(require(&staff, Capability::ManageBookings).is_ok());
        let err = require(&staff, Capability::ManageStaff).unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
    }
}
