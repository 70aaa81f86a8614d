//! Staff REST API handlers
//!
//! The whole module is gated on the `ManageStaff` capability; only
//! admins administer accounts.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use super::dto::{CreateStaffRequest, StaffDto, UpdateStaffRequest};
use crate::domain::staff::{Staff, StaffRole, StaffStatus};
use crate::domain::{Capability, RepositoryProvider};
use crate::infrastructure::crypto::password::hash_password;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

#[derive(Clone)]
pub struct StaffHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Staff list", body = ApiResponse<Vec<StaffDto>>),
        (status = 403, description = "Missing capability")
    )
)]
pub async fn list_staff(
    State(state): State<StaffHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
) -> Result<Json<ApiResponse<Vec<StaffDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageStaff)?;

    let staff = state.repos.staff().find_all().await.map_err(error_response)?;
    let dtos: Vec<StaffDto> = staff.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Staff details", body = ApiResponse<StaffDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_staff(
    State(state): State<StaffHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<StaffDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageStaff)?;

    let staff = state
        .repos
        .staff()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(staff) = staff else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Staff {} not found", id))),
        ));
    };
    Ok(Json(ApiResponse::success(staff.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<StaffDto>),
        (status = 400, description = "Unknown role"),
        (status = 409, description = "Username or email taken")
    )
)]
pub async fn create_staff(
    State(state): State<StaffHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreateStaffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageStaff)?;

    let Some(role) = StaffRole::from_str(&req.role) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown role: {}", req.role))),
        ));
    };

    let existing = state
        .repos
        .staff()
        .find_by_username(&req.username)
        .await
        .map_err(error_response)?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(format!(
                "Username {} already exists",
                req.username
            ))),
        ));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let now = Utc::now();
    let staff = Staff {
        id: 0,
        username: req.username,
        password_hash,
        full_name: req.full_name,
        email: req.email,
        phone: req.phone,
        role,
        salary: req.salary,
        hire_date: req.hire_date.unwrap_or_else(|| now.date_naive()),
        status: StaffStatus::Active,
        created_at: now,
    };

    let saved = state.repos.staff().save(staff).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Staff ID")),
    request_body = UpdateStaffRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<StaffDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_staff(
    State(state): State<StaffHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<StaffDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageStaff)?;

    let existing = state
        .repos
        .staff()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(mut staff) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Staff {} not found", id))),
        ));
    };

    if let Some(role) = &req.role {
        staff.role = StaffRole::from_str(role).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown role: {}", role))),
            )
        })?;
    }
    if let Some(status) = &req.status {
        staff.status = StaffStatus::from_str(status).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status: {}", status))),
            )
        })?;
    }
    if let Some(full_name) = req.full_name {
        staff.full_name = full_name;
    }
    if let Some(email) = req.email {
        staff.email = email;
    }
    if req.phone.is_some() {
        staff.phone = req.phone;
    }
    if req.salary.is_some() {
        staff.salary = req.salary;
    }

    state
        .repos
        .staff()
        .update(staff.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(staff.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_staff(
    State(state): State<StaffHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageStaff)?;

    if caller.staff_id == id {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Cannot delete your own account")),
        ));
    }

    state.repos.staff().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Staff deleted".to_string())))
}
