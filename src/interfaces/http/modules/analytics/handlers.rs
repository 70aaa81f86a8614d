//! Analytics API handlers
//!
//! Thin wrappers over [`ReportingService`]; the occupancy report runs
//! on the same interval model as booking admission.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use super::dto::*;
use crate::application::ReportingService;
use crate::domain::{Capability, StayInterval};
use crate::interfaces::http::common::{error_response, ApiResponse};
use crate::interfaces::http::middleware::{require, AuthenticatedStaff};

/// Analytics handler state
#[derive(Clone)]
pub struct AnalyticsState {
    pub reporting: Arc<ReportingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/summary",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<SummaryDto>)
    )
)]
pub async fn analytics_summary(
    State(state): State<AnalyticsState>,
    Extension(caller): Extension<AuthenticatedStaff>,
) -> Result<Json<ApiResponse<SummaryDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ViewAnalytics)?;

    let summary = state
        .reporting
        .summary(Utc::now().date_naive())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(summary.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/occupancy-rate",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    params(OccupancyParams),
    responses(
        (status = 200, description = "Per-room-type occupancy over the range", body = ApiResponse<Vec<OccupancyDto>>),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn analytics_occupancy(
    State(state): State<AnalyticsState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Query(params): Query<OccupancyParams>,
) -> Result<Json<ApiResponse<Vec<OccupancyDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ViewAnalytics)?;

    let range = StayInterval::parse(&params.start_date, &params.end_date)
        .map_err(|e| error_response(e.into()))?;

    let report = state
        .reporting
        .occupancy(range)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        report.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/revenue-by-room-type",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Revenue per room type", body = ApiResponse<Vec<RoomTypeRevenueDto>>)
    )
)]
pub async fn analytics_revenue_by_room_type(
    State(state): State<AnalyticsState>,
    Extension(caller): Extension<AuthenticatedStaff>,
) -> Result<Json<ApiResponse<Vec<RoomTypeRevenueDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ViewAnalytics)?;

    let report = state
        .reporting
        .revenue_by_room_type()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        report.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/monthly-revenue",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Revenue per month, newest first", body = ApiResponse<Vec<MonthlyRevenueDto>>)
    )
)]
pub async fn analytics_monthly_revenue(
    State(state): State<AnalyticsState>,
    Extension(caller): Extension<AuthenticatedStaff>,
) -> Result<Json<ApiResponse<Vec<MonthlyRevenueDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ViewAnalytics)?;

    let report = state
        .reporting
        .monthly_revenue(12)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        report.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/top-customers",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    params(TopCustomersParams),
    responses(
        (status = 200, description = "Customers ranked by spend", body = ApiResponse<Vec<TopCustomerDto>>)
    )
)]
pub async fn analytics_top_customers(
    State(state): State<AnalyticsState>,
    Extension(caller): Extension<AuthenticatedStaff>,
    Query(params): Query<TopCustomersParams>,
) -> Result<Json<ApiResponse<Vec<TopCustomerDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ViewAnalytics)?;

    let report = state
        .reporting
        .top_customers(params.limit.unwrap_or(10))
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        report.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/popular-services",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Services ranked by bookings", body = ApiResponse<Vec<ServicePopularityDto>>)
    )
)]
pub async fn analytics_popular_services(
    State(state): State<AnalyticsState>,
    Extension(caller): Extension<AuthenticatedStaff>,
) -> Result<Json<ApiResponse<Vec<ServicePopularityDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    require(&caller, Capability::ViewAnalytics)?;

    let report = state
        .reporting
        .popular_services()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        report.into_iter().map(Into::into).collect(),
    )))
}
