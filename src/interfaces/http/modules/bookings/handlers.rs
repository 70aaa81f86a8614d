//! Booking REST API handlers
//!
//! Thin HTTP layer over [`BookingService`]: parses dates into
//! `StayInterval`, translates domain errors into wire responses, and
//! decorates listings with customer/room summaries.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AvailabilityCheckResponse, BookingDto, CheckAvailabilityParams, CreateBookingRequest,
    UpdateBookingRequest, UpdateBookingStatusRequest,
};
use crate::application::{BookingService, CreateBooking};
use crate::domain::booking::BookingStatus;
use crate::domain::{Capability, RepositoryProvider, StayInterval};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

#[derive(Clone)]
pub struct BookingHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub bookings: Arc<BookingService>,
}

fn parse_interval(
    check_in: &str,
    check_out: &str,
) -> Result<StayInterval, (StatusCode, Json<ApiResponse<()>>)> {
    StayInterval::parse(check_in, check_out).map_err(|e| error_response(e.into()))
}

fn parse_status(s: &str) -> Result<BookingStatus, (StatusCode, Json<ApiResponse<()>>)> {
    BookingStatus::from_str(s).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown booking status: {}", s))),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings with customer and room summaries", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingHandlerState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let bookings = state
        .repos
        .bookings()
        .find_all()
        .await
        .map_err(error_response)?;
    let customers = state
        .repos
        .customers()
        .find_all()
        .await
        .map_err(error_response)?;
    let rooms = state.repos.rooms().find_all().await.map_err(error_response)?;

    let customer_names: HashMap<i32, String> =
        customers.iter().map(|c| (c.id, c.full_name())).collect();
    let room_numbers: HashMap<i32, String> = rooms
        .iter()
        .map(|r| (r.id, r.room_number.clone()))
        .collect();

    let dtos: Vec<BookingDto> = bookings
        .iter()
        .map(|b| {
            BookingDto::with_summary(
                b,
                customer_names.get(&b.customer_id).cloned(),
                room_numbers.get(&b.room_id).cloned(),
            )
        })
        .collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let booking = state
        .repos
        .bookings()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(booking) = booking else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Booking {} not found", id))),
        ));
    };

    let customer = state
        .repos
        .customers()
        .find_by_id(booking.customer_id)
        .await
        .map_err(error_response)?;
    let room = state
        .repos
        .rooms()
        .find_by_id(booking.room_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::with_summary(
        &booking,
        customer.map(|c| c.full_name()),
        room.map(|r| r.room_number),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/check-availability",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(CheckAvailabilityParams),
    responses(
        (status = 200, description = "Availability verdict", body = ApiResponse<AvailabilityCheckResponse>),
        (status = 400, description = "Invalid interval")
    )
)]
pub async fn check_availability(
    State(state): State<BookingHandlerState>,
    Query(params): Query<CheckAvailabilityParams>,
) -> Result<Json<ApiResponse<AvailabilityCheckResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let interval = parse_interval(&params.check_in, &params.check_out)?;

    let available = state
        .bookings
        .engine()
        .is_room_available(params.room_id, &interval, params.exclude_booking_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(AvailabilityCheckResponse {
        room_id: params.room_id,
        check_in: interval.check_in(),
        check_out: interval.check_out(),
        available,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking admitted", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid interval or guest count"),
        (status = 409, description = "Room not available for the interval")
    )
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageBookings)?;

    let interval = parse_interval(&req.check_in, &req.check_out)?;
    let status = match req.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => BookingStatus::Confirmed,
    };

    let booking = state
        .bookings
        .create(CreateBooking {
            customer_id: req.customer_id,
            room_id: req.room_id,
            interval,
            guests: req.guests,
            special_requests: req.special_requests,
            status,
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from_booking(&booking))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid interval"),
        (status = 404, description = "Not found"),
        (status = 409, description = "New interval conflicts; booking unchanged")
    )
)]
pub async fn update_booking(
    State(state): State<BookingHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageBookings)?;

    // Date or room moves go through the admission path
    let mut booking = match (&req.check_in, &req.check_out) {
        (Some(check_in), Some(check_out)) => {
            let interval = parse_interval(check_in, check_out)?;
            state
                .bookings
                .reschedule(id, req.room_id, interval)
                .await
                .map_err(error_response)?
        }
        (None, None) => {
            if let Some(room_id) = req.room_id {
                let current = state
                    .repos
                    .bookings()
                    .find_by_id(id)
                    .await
                    .map_err(error_response)?
                    .ok_or_else(|| {
                        (
                            StatusCode::NOT_FOUND,
                            Json(ApiResponse::error(format!("Booking {} not found", id))),
                        )
                    })?;
                state
                    .bookings
                    .reschedule(id, Some(room_id), current.interval)
                    .await
                    .map_err(error_response)?
            } else {
                state
                    .repos
                    .bookings()
                    .find_by_id(id)
                    .await
                    .map_err(error_response)?
                    .ok_or_else(|| {
                        (
                            StatusCode::NOT_FOUND,
                            Json(ApiResponse::error(format!("Booking {} not found", id))),
                        )
                    })?
            }
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "check_in and check_out must be provided together",
                )),
            ));
        }
    };

    if req.guests.is_some() || req.special_requests.is_some() {
        booking = state
            .bookings
            .update_details(id, req.guests, req.special_requests.map(Some))
            .await
            .map_err(error_response)?;
    }

    Ok(Json(ApiResponse::success(BookingDto::from_booking(&booking))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/status",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<BookingDto>),
        (status = 400, description = "Illegal transition"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Room no longer available (Pending -> Confirmed)")
    )
)]
pub async fn update_booking_status(
    State(state): State<BookingHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageBookings)?;

    let status = parse_status(&req.status)?;
    let booking = state
        .bookings
        .transition(id, status)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from_booking(&booking))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Booking is checked in"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Booking has payments")
    )
)]
pub async fn delete_booking(
    State(state): State<BookingHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageBookings)?;

    state.bookings.delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        "Booking and associated services deleted".to_string(),
    )))
}
