//! Room REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use rust_decimal::Decimal;

use super::dto::{AvailabilityParams, CreateRoomRequest, RoomDto, UpdateRoomRequest};
use crate::domain::availability::AvailabilityEngine;
use crate::domain::booking::BookingStatus;
use crate::domain::room::{Room, RoomStatus, RoomType};
use crate::domain::{Capability, RepositoryProvider, StayInterval};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

#[derive(Clone)]
pub struct RoomHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub engine: Arc<AvailabilityEngine>,
}

const ALL_BOOKING_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::CheckedIn,
    BookingStatus::CheckedOut,
    BookingStatus::Cancelled,
];

fn parse_room_type(s: &str) -> Result<RoomType, (StatusCode, Json<ApiResponse<()>>)> {
    RoomType::from_str(s).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown room type: {}", s))),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Room list with derived status", body = ApiResponse<Vec<RoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomHandlerState>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let rooms = state.repos.rooms().find_all().await.map_err(error_response)?;
    let today = Utc::now().date_naive();

    let mut dtos = Vec::with_capacity(rooms.len());
    for room in rooms {
        let status = state
            .engine
            .derived_room_status(&room, today)
            .await
            .map_err(error_response)?;
        dtos.push(RoomDto::with_status(room, status));
    }
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let room = state
        .repos
        .rooms()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(room) = room else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Room {} not found", id))),
        ));
    };

    let status = state
        .engine
        .derived_room_status(&room, Utc::now().date_naive())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(RoomDto::with_status(room, status))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/availability",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Rooms free over the interval, cheapest first", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Invalid interval")
    )
)]
pub async fn list_available_rooms(
    State(state): State<RoomHandlerState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let interval = StayInterval::parse(&params.check_in, &params.check_out)
        .map_err(|e| error_response(e.into()))?;
    let room_type = params
        .room_type
        .as_deref()
        .map(parse_room_type)
        .transpose()?;

    let rooms = state
        .engine
        .list_available_rooms(&interval, room_type)
        .await
        .map_err(error_response)?;

    let dtos: Vec<RoomDto> = rooms.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<RoomDto>),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn create_room(
    State(state): State<RoomHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageRooms)?;

    let room_type = parse_room_type(&req.room_type)?;
    if req.price_per_night <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Price per night must be positive")),
        ));
    }

    let existing = state
        .repos
        .rooms()
        .find_by_number(&req.room_number)
        .await
        .map_err(error_response)?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(format!(
                "Room number {} already exists",
                req.room_number
            ))),
        ));
    }

    let room = Room {
        id: 0,
        room_number: req.room_number,
        room_type,
        price_per_night: req.price_per_night,
        max_occupancy: req.max_occupancy,
        floor: req.floor,
        description: req.description,
        amenities: req.amenities,
        status: RoomStatus::Available,
        created_at: Utc::now(),
    };

    let saved = state.repos.rooms().save(room).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn update_room(
    State(state): State<RoomHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageRooms)?;

    let existing = state
        .repos
        .rooms()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(mut room) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Room {} not found", id))),
        ));
    };

    if let Some(number) = &req.room_number {
        if number != &room.room_number {
            let taken = state
                .repos
                .rooms()
                .find_by_number(number)
                .await
                .map_err(error_response)?;
            if taken.is_some() {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error(format!(
                        "Room number {} already exists",
                        number
                    ))),
                ));
            }
            room.room_number = number.clone();
        }
    }
    if let Some(room_type) = &req.room_type {
        room.room_type = parse_room_type(room_type)?;
    }
    if let Some(price) = req.price_per_night {
        if price <= Decimal::ZERO {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Price per night must be positive")),
            ));
        }
        room.price_per_night = price;
    }
    if let Some(max_occupancy) = req.max_occupancy {
        room.max_occupancy = max_occupancy;
    }
    if req.floor.is_some() {
        room.floor = req.floor;
    }
    if req.description.is_some() {
        room.description = req.description;
    }
    if req.amenities.is_some() {
        room.amenities = req.amenities;
    }
    if let Some(status) = &req.status {
        room.status = RoomStatus::from_str(status).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status: {}", status))),
            )
        })?;
    }

    state
        .repos
        .rooms()
        .update(room.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Room has bookings")
    )
)]
pub async fn delete_room(
    State(state): State<RoomHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageRooms)?;

    let bookings = state
        .repos
        .bookings()
        .find_occupying_for_room(id, ALL_BOOKING_STATUSES, None)
        .await
        .map_err(error_response)?;
    if !bookings.is_empty() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Cannot delete room with existing bookings; delete the bookings first or set the room to Maintenance",
            )),
        ));
    }

    state.repos.rooms().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Room deleted".to_string())))
}
