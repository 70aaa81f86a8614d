//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, ReportingService};
use crate::config::AppConfig;
use crate::domain::availability::AvailabilityEngine;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::http_metrics_middleware;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    analytics, auth, bookings, customers, health, metrics as metrics_module, payments, rooms,
    services, staff,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::get_current_staff,
        auth::handlers::change_password,
        // Staff
        staff::handlers::list_staff,
        staff::handlers::get_staff,
        staff::handlers::create_staff,
        staff::handlers::update_staff,
        staff::handlers::delete_staff,
        // Customers
        customers::handlers::list_customers,
        customers::handlers::get_customer,
        customers::handlers::create_customer,
        customers::handlers::update_customer,
        customers::handlers::delete_customer,
        // Rooms
        rooms::handlers::list_rooms,
        rooms::handlers::get_room,
        rooms::handlers::list_available_rooms,
        rooms::handlers::create_room,
        rooms::handlers::update_room,
        rooms::handlers::delete_room,
        // Bookings
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::check_availability,
        bookings::handlers::create_booking,
        bookings::handlers::update_booking,
        bookings::handlers::update_booking_status,
        bookings::handlers::delete_booking,
        // Payments
        payments::handlers::list_payments,
        payments::handlers::get_payment,
        payments::handlers::create_payment,
        payments::handlers::update_payment,
        payments::handlers::delete_payment,
        // Services
        services::handlers::list_services,
        services::handlers::get_service,
        services::handlers::create_service,
        services::handlers::update_service,
        services::handlers::delete_service,
        services::handlers::list_booking_services,
        services::handlers::create_booking_service,
        services::handlers::delete_booking_service,
        // Analytics
        analytics::handlers::analytics_summary,
        analytics::handlers::analytics_occupancy,
        analytics::handlers::analytics_revenue_by_room_type,
        analytics::handlers::analytics_monthly_revenue,
        analytics::handlers::analytics_top_customers,
        analytics::handlers::analytics_popular_services,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::StaffInfo,
            auth::ChangePasswordRequest,
            // Staff
            staff::StaffDto,
            staff::CreateStaffRequest,
            staff::UpdateStaffRequest,
            // Customers
            customers::CustomerDto,
            customers::CreateCustomerRequest,
            customers::UpdateCustomerRequest,
            // Rooms
            rooms::RoomDto,
            rooms::CreateRoomRequest,
            rooms::UpdateRoomRequest,
            // Bookings
            bookings::BookingDto,
            bookings::CreateBookingRequest,
            bookings::UpdateBookingRequest,
            bookings::UpdateBookingStatusRequest,
            bookings::AvailabilityCheckResponse,
            // Payments
            payments::PaymentDto,
            payments::CreatePaymentRequest,
            payments::UpdatePaymentRequest,
            // Services
            services::ServiceDto,
            services::CreateServiceRequest,
            services::UpdateServiceRequest,
            services::BookingServiceDto,
            services::CreateBookingServiceRequest,
            // Analytics
            analytics::SummaryDto,
            analytics::OccupancyDto,
            analytics::RoomTypeRevenueDto,
            analytics::MonthlyRevenueDto,
            analytics::TopCustomerDto,
            analytics::ServicePopularityDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Staff login (JWT) and password management"),
        (name = "Staff", description = "Staff account administration"),
        (name = "Customers", description = "Guest records"),
        (name = "Rooms", description = "Room inventory and availability search"),
        (name = "Bookings", description = "Booking lifecycle: admission, status transitions, edits"),
        (name = "Payments", description = "Payments against bookings"),
        (name = "Services", description = "Service catalog and per-booking service lines"),
        (name = "Analytics", description = "Occupancy, revenue and customer reports"),
    ),
    info(
        title = "Brightstay HMS API",
        version = "1.0.0",
        description = "REST API for the Brightstay hotel management back office",
        license(name = "MIT"),
        contact(name = "Brightstay", email = "support@brightstay.local")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
    app_cfg: &AppConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let engine = Arc::new(AvailabilityEngine::new(repos.clone()));
    let booking_service = Arc::new(BookingService::new(repos.clone()));
    let reporting = Arc::new(ReportingService::new(repos.clone()));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Login rate limiting (per client IP)
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(app_cfg.rate_limit.login_per_second)
            .burst_size(app_cfg.rate_limit.login_burst)
            .finish()
            .expect("valid rate limit config"),
    );

    let auth_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };

    // Auth routes (public, rate limited)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .layer(GovernorLayer::new(governor_conf))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_staff))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Staff routes (protected)
    let staff_routes = Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/{id}",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::delete_staff),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(staff::StaffHandlerState {
            repos: repos.clone(),
        });

    // Customer routes (protected)
    let customer_routes = Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(customers::CustomerHandlerState {
            repos: repos.clone(),
        });

    // Room routes (protected)
    let room_routes = Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/availability", get(rooms::list_available_rooms))
        .route(
            "/{id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(rooms::RoomHandlerState {
            repos: repos.clone(),
            engine,
        });

    // Booking routes (protected)
    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/check-availability", get(bookings::check_availability))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route("/{id}/status", axum::routing::patch(bookings::update_booking_status))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(bookings::BookingHandlerState {
            repos: repos.clone(),
            bookings: booking_service.clone(),
        });

    // Payment routes (protected)
    let payment_routes = Router::new()
        .route(
            "/",
            get(payments::list_payments).post(payments::create_payment),
        )
        .route(
            "/{id}",
            get(payments::get_payment)
                .put(payments::update_payment)
                .delete(payments::delete_payment),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(payments::PaymentHandlerState {
            repos: repos.clone(),
        });

    // Service catalog routes (protected)
    let service_state = services::ServiceHandlerState {
        repos: repos.clone(),
        bookings: booking_service,
    };
    let service_routes = Router::new()
        .route(
            "/",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/{id}",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(service_state.clone());

    // Booking service line routes (protected)
    let booking_service_routes = Router::new()
        .route(
            "/",
            get(services::list_booking_services).post(services::create_booking_service),
        )
        .route(
            "/{id}",
            axum::routing::delete(services::delete_booking_service),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(service_state);

    // Analytics routes (protected)
    let analytics_routes = Router::new()
        .route("/summary", get(analytics::analytics_summary))
        .route("/occupancy-rate", get(analytics::analytics_occupancy))
        .route(
            "/revenue-by-room-type",
            get(analytics::analytics_revenue_by_room_type),
        )
        .route(
            "/monthly-revenue",
            get(analytics::analytics_monthly_revenue),
        )
        .route("/top-customers", get(analytics::analytics_top_customers))
        .route(
            "/popular-services",
            get(analytics::analytics_popular_services),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(analytics::AnalyticsState { reporting });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics (no auth)
        .route(
            "/health",
            get(health::health_check).with_state(health::HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            }),
        )
        .route(
            "/metrics",
            get(metrics_module::prometheus_metrics).with_state(metrics_module::MetricsState {
                handle: prometheus_handle,
            }),
        )
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Resources
        .nest("/api/v1/staff", staff_routes)
        .nest("/api/v1/customers", customer_routes)
        .nest("/api/v1/rooms", room_routes)
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/payments", payment_routes)
        .nest("/api/v1/services", service_routes)
        .nest("/api/v1/booking-services", booking_service_routes)
        .nest("/api/v1/analytics", analytics_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
