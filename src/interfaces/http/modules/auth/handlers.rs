//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse, StaffInfo};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedStaff;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

fn staff_info(s: &crate::domain::Staff) -> StaffInfo {
    StaffInfo {
        id: s.id,
        username: s.username.clone(),
        full_name: s.full_name.clone(),
        email: s.email.clone(),
        role: s.role.as_str().to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let staff = state
        .repos
        .staff()
        .find_by_username(&request.username)
        .await
        .map_err(error_response)?;

    let Some(staff) = staff else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    };

    if !staff.is_active() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Account is disabled")),
        ));
    }

    let password_valid = verify_password(&request.password, &staff.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    }

    let token = create_token(
        staff.id,
        &staff.username,
        staff.role.as_str(),
        &state.jwt_config,
    )
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        staff: staff_info(&staff),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current staff info", body = ApiResponse<StaffInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_staff(
    State(state): State<AuthHandlerState>,
    Extension(staff): Extension<AuthenticatedStaff>,
) -> Result<Json<ApiResponse<StaffInfo>>, (StatusCode, Json<ApiResponse<()>>)> {
    let record = state
        .repos
        .staff()
        .find_by_id(staff.staff_id)
        .await
        .map_err(error_response)?;

    let Some(record) = record else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Staff member not found")),
        ));
    };

    Ok(Json(ApiResponse::success(staff_info(&record))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Invalid current password"),
        (status = 422, description = "New password too short")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(staff): Extension<AuthenticatedStaff>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let record = state
        .repos
        .staff()
        .find_by_id(staff.staff_id)
        .await
        .map_err(error_response)?;

    let Some(mut record) = record else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Staff member not found")),
        ));
    };

    let password_valid =
        verify_password(&request.current_password, &record.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid current password")),
        ));
    }

    record.password_hash = hash_password(&request.new_password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;
    state
        .repos
        .staff()
        .update(record)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
