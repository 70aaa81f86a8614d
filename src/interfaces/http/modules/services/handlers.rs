//! Service catalog and booking-service-line REST API handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use rust_decimal::Decimal;

use super::dto::{
    BookingServiceDto, CreateBookingServiceRequest, CreateServiceRequest, ServiceDto,
    UpdateServiceRequest,
};
use crate::application::BookingService as BookingAppService;
use crate::domain::service::{Service, ServiceAvailability};
use crate::domain::{Capability, RepositoryProvider};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

#[derive(Clone)]
pub struct ServiceHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub bookings: Arc<BookingAppService>,
}

fn parse_availability(
    s: &str,
) -> Result<ServiceAvailability, (StatusCode, Json<ApiResponse<()>>)> {
    ServiceAvailability::from_str(s).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown availability: {}", s))),
        )
    })
}

// ── Catalog ────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Service catalog", body = ApiResponse<Vec<ServiceDto>>)
    )
)]
pub async fn list_services(
    State(state): State<ServiceHandlerState>,
) -> Result<Json<ApiResponse<Vec<ServiceDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let services = state
        .repos
        .services()
        .find_all()
        .await
        .map_err(error_response)?;
    let dtos: Vec<ServiceDto> = services.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service details", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_service(
    State(state): State<ServiceHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ServiceDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let service = state
        .repos
        .services()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(service) = service else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Service {} not found", id))),
        ));
    };
    Ok(Json(ApiResponse::success(service.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn create_service(
    State(state): State<ServiceHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageServices)?;

    if req.price <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Price must be positive")),
        ));
    }
    let availability = match req.availability.as_deref() {
        Some(s) => parse_availability(s)?,
        None => ServiceAvailability::Available,
    };

    let service = Service {
        id: 0,
        name: req.name,
        description: req.description,
        price: req.price,
        category: req.category,
        availability,
        created_at: Utc::now(),
    };

    let saved = state
        .repos
        .services()
        .save(service)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_service(
    State(state): State<ServiceHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageServices)?;

    let existing = state
        .repos
        .services()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(mut service) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Service {} not found", id))),
        ));
    };

    if let Some(name) = req.name {
        service.name = name;
    }
    if req.description.is_some() {
        service.description = req.description;
    }
    if let Some(price) = req.price {
        if price <= Decimal::ZERO {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Price must be positive")),
            ));
        }
        service.price = price;
    }
    if let Some(category) = req.category {
        service.category = category;
    }
    if let Some(availability) = &req.availability {
        service.availability = parse_availability(availability)?;
    }

    state
        .repos
        .services()
        .update(service.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(service.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Service has booking lines")
    )
)]
pub async fn delete_service(
    State(state): State<ServiceHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageServices)?;

    let lines = state
        .repos
        .booking_services()
        .find_for_service(id)
        .await
        .map_err(error_response)?;
    if !lines.is_empty() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Cannot delete service with existing booking lines",
            )),
        ));
    }

    state
        .repos
        .services()
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success("Service deleted".to_string())))
}

// ── Booking service lines ──────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/booking-services",
    tag = "Services",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All booking service lines", body = ApiResponse<Vec<BookingServiceDto>>)
    )
)]
pub async fn list_booking_services(
    State(state): State<ServiceHandlerState>,
) -> Result<Json<ApiResponse<Vec<BookingServiceDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let lines = state
        .repos
        .booking_services()
        .find_all()
        .await
        .map_err(error_response)?;
    let services = state
        .repos
        .services()
        .find_all()
        .await
        .map_err(error_response)?;

    let catalog: HashMap<i32, (String, String)> = services
        .iter()
        .map(|s| (s.id, (s.name.clone(), s.category.clone())))
        .collect();

    let dtos: Vec<BookingServiceDto> = lines
        .iter()
        .map(|line| {
            let mut dto = BookingServiceDto::from_line(line);
            if let Some((name, category)) = catalog.get(&line.service_id) {
                dto.service_name = Some(name.clone());
                dto.category = Some(category.clone());
            }
            dto
        })
        .collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    post,
    path = "/api/v1/booking-services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateBookingServiceRequest,
    responses(
        (status = 201, description = "Line added; booking total grew", body = ApiResponse<BookingServiceDto>),
        (status = 400, description = "Booking no longer accepts services"),
        (status = 404, description = "Booking or service not found")
    )
)]
pub async fn create_booking_service(
    State(state): State<ServiceHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreateBookingServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingServiceDto>>), (StatusCode, Json<ApiResponse<()>>)>
{
    require(&caller, Capability::ManageBookings)?;

    let line = state
        .bookings
        .add_service_line(req.booking_id, req.service_id, req.quantity, req.service_date)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingServiceDto::from_line(&line))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/booking-services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking service line ID")),
    responses(
        (status = 200, description = "Line removed; booking total shrank"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_booking_service(
    State(state): State<ServiceHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageBookings)?;

    state
        .bookings
        .remove_service_line(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        "Service booking deleted".to_string(),
    )))
}
