//! Customer REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use super::dto::{CreateCustomerRequest, CustomerDto, UpdateCustomerRequest};
use crate::domain::{Capability, Customer, RepositoryProvider};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

#[derive(Clone)]
pub struct CustomerHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customer list", body = ApiResponse<Vec<CustomerDto>>)
    )
)]
pub async fn list_customers(
    State(state): State<CustomerHandlerState>,
) -> Result<Json<ApiResponse<Vec<CustomerDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let customers = state
        .repos
        .customers()
        .find_all()
        .await
        .map_err(error_response)?;
    let dtos: Vec<CustomerDto> = customers.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CustomerDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let customer = state
        .repos
        .customers()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(customer) = customer else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        ));
    };
    Ok(Json(ApiResponse::success(customer.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CustomerDto>),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_customer(
    State(state): State<CustomerHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    ValidatedJson(req): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageCustomers)?;

    let existing = state
        .repos
        .customers()
        .find_by_email(&req.email)
        .await
        .map_err(error_response)?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(format!(
                "Email {} already exists",
                req.email
            ))),
        ));
    }

    let customer = Customer {
        id: 0,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        address: req.address,
        id_proof_type: req.id_proof_type,
        id_proof_number: req.id_proof_number,
        date_of_birth: req.date_of_birth,
        created_at: Utc::now(),
    };

    let saved = state
        .repos
        .customers()
        .save(customer)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_customer(
    State(state): State<CustomerHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageCustomers)?;

    let existing = state
        .repos
        .customers()
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    let Some(mut customer) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        ));
    };

    if let Some(email) = &req.email {
        if email != &customer.email {
            let taken = state
                .repos
                .customers()
                .find_by_email(email)
                .await
                .map_err(error_response)?;
            if taken.is_some() {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error(format!("Email {} already exists", email))),
                ));
            }
            customer.email = email.clone();
        }
    }
    if let Some(first_name) = req.first_name {
        customer.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        customer.last_name = last_name;
    }
    if req.phone.is_some() {
        customer.phone = req.phone;
    }
    if req.address.is_some() {
        customer.address = req.address;
    }
    if req.id_proof_type.is_some() {
        customer.id_proof_type = req.id_proof_type;
    }
    if req.id_proof_number.is_some() {
        customer.id_proof_number = req.id_proof_number;
    }
    if req.date_of_birth.is_some() {
        customer.date_of_birth = req.date_of_birth;
    }

    state
        .repos
        .customers()
        .update(customer.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(customer.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Customer has bookings")
    )
)]
pub async fn delete_customer(
    State(state): State<CustomerHandlerState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ManageCustomers)?;

    let bookings = state
        .repos
        .bookings()
        .find_for_customer(id)
        .await
        .map_err(error_response)?;
    if !bookings.is_empty() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(format!(
                "Customer {} has {} booking(s); delete those first",
                id,
                bookings.len()
            ))),
        ));
    }

    state
        .repos
        .customers()
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success("Customer deleted".to_string())))
}
