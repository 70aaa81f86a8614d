//! Payment REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use rust_decimal::Decimal;

use super::dto::{CreatePaymentRequest, PaymentDto, UpdatePaymentRequest};
use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::domain::{Capability, RepositoryProvider};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

#[derive(Clone)]
pub struct PaymentHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

fn parse_method(s: &str) -> Result<PaymentMethod, (StatusCode, Json<ApiResponse<()>>)> {
    PaymentMethod::from_str(s).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown payment method: {}", s))),
        )
    })
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, (StatusCode, Json<ApiResponse<()>>)> {
    PaymentStatus::from_str(s).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown payment status: {}", s))),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment list", body = ApiResponse<Vec<PaymentDto>>)
    )
)]
pub async fn list_payments(
    State(state): State<PaymentHandlerState>,
) -> Result<Json<ApiResponse<Vec<PaymentDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let payments = state
        .repos
        .payments()
        .find_all()
        .await
        .map_err(error_response)?;
    let dtos: Vec<PaymentDto> = payments.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_payment(
    State(state): State<PaymentHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PaymentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let payment = state
        .repos
        .payments()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(payment) = payment else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Payment {} not found", id))),
        ));
    };
    Ok(Json(ApiResponse::success(payment.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<PaymentDto>),
        (status = 400, description = "Invalid amount or method"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn create_payment(
    State(state): State<PaymentHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManagePayments)?;

    if req.amount <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Amount must be positive")),
        ));
    }

    let method = parse_method(&req.method)?;
    let status = match req.status.as_deref() {
        Some(s) => parse_payment_status(s)?,
        None => PaymentStatus::Completed,
    };

    let booking = state
        .repos
        .bookings()
        .find_by_id(req.booking_id)
        .await
        .map_err(error_response)?;
    if booking.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Booking {} not found",
                req.booking_id
            ))),
        ));
    }

    let payment = Payment {
        id: 0,
        booking_id: req.booking_id,
        amount: req.amount,
        method,
        status,
        transaction_ref: req.transaction_ref,
        paid_at: Utc::now(),
    };

    let saved = state
        .repos
        .payments()
        .save(payment)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_payment(
    State(state): State<PaymentHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<PaymentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManagePayments)?;

    let existing = state
        .repos
        .payments()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(mut payment) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Payment {} not found", id))),
        ));
    };

    if let Some(amount) = req.amount {
        if amount <= Decimal::ZERO {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Amount must be positive")),
            ));
        }
        payment.amount = amount;
    }
    if let Some(method) = &req.method {
        payment.method = parse_method(method)?;
    }
    if let Some(status) = &req.status {
        payment.status = parse_payment_status(status)?;
    }
    if req.transaction_ref.is_some() {
        payment.transaction_ref = req.transaction_ref;
    }

    state
        .repos
        .payments()
        .update(payment.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(payment.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_payment(
    State(state): State<PaymentHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManagePayments)?;

    state
        .repos
        .payments()
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success("Payment deleted".to_string())))
}
