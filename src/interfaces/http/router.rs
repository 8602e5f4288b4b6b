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
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::UserService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::UserRepository;

use super::common::{ApiResponse, PaginatedResponse, PaginationQuery};
use super::middleware::{auth_middleware, AuthState};
use super::modules::analytics::handlers as analytics;
use super::modules::auth::handlers as auth;
use super::modules::health::handlers as health;
use super::modules::metrics::handlers as metrics;
use super::modules::metrics::middleware::http_metrics_middleware;
use super::modules::request_id::request_id_middleware;
use super::modules::scans::handlers as scans;
use super::modules::users::handlers as users;
use super::modules::vehicles::handlers as vehicles;
use super::modules::violations::handlers as violations;

use super::modules::analytics::dto::{
    DashboardKpis, DashboardStats, RecentActivity, Report, ScanActivity, VehicleStatistics,
    ViolationTrends,
};
use super::modules::auth::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UserInfo,
};
use super::modules::health::handlers::{ComponentHealth, HealthResponse};
use super::modules::scans::dto::{CreateScanRequest, DailyScanCount, DailyScanStats, ScanDto};
use super::modules::users::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use super::modules::vehicles::dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleDto};
use super::modules::violations::dto::{
    CreateViolationRequest, UpdateViolationRequest, ViolationDto,
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
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        // Users
        users::list_users,
        users::pending_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::approve_user,
        users::activate_user,
        users::deactivate_user,
        users::reject_user,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Violations
        violations::list_violations,
        violations::get_violation,
        violations::create_violation,
        violations::update_violation,
        violations::resolve_violation,
        violations::delete_violation,
        // Scans
        scans::list_scans,
        scans::get_scan,
        scans::create_scan,
        scans::daily_scan_stats,
        scans::delete_scan,
        // Analytics
        analytics::dashboard_stats,
        analytics::violation_trends,
        analytics::scan_activity,
        analytics::vehicle_statistics,
        analytics::generate_report,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginationQuery,
            PaginatedResponse<UserDto>,
            PaginatedResponse<VehicleDto>,
            PaginatedResponse<ViolationDto>,
            PaginatedResponse<ScanDto>,
            // Health
            HealthResponse,
            ComponentHealth,
            // Auth
            LoginRequest,
            LoginResponse,
            UserInfo,
            RegisterRequest,
            ChangePasswordRequest,
            // Users
            UserDto,
            CreateUserRequest,
            UpdateUserRequest,
            // Vehicles
            VehicleDto,
            CreateVehicleRequest,
            UpdateVehicleRequest,
            // Violations
            ViolationDto,
            CreateViolationRequest,
            UpdateViolationRequest,
            // Scans
            ScanDto,
            CreateScanRequest,
            DailyScanCount,
            DailyScanStats,
            // Analytics
            DashboardKpis,
            RecentActivity,
            DashboardStats,
            ViolationTrends,
            ScanActivity,
            VehicleStatistics,
            Report,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: login (JWT), registration, password change"),
        (name = "Users", description = "User account management: CRUD, approval, activation"),
        (name = "Vehicles", description = "Vehicle registry CRUD operations"),
        (name = "Violations", description = "Traffic violation management"),
        (name = "Scans", description = "Plate scan records from recognition cameras"),
        (name = "Analytics", description = "Dashboard statistics, trends, and reports"),
    ),
    info(
        title = "VPR Admin Service API",
        version = "1.0.0",
        description = "REST API for the Vehicle Plate Recognition administration system",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    user_service: Arc<UserService<UserRepository>>,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState { jwt_config };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_handler_state = auth::AuthHandlerState {
        user_service: user_service.clone(),
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_handler_state);

    // User routes (protected; mutations additionally require Administrator)
    let user_state = users::UserHandlerState { user_service };
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/pending", get(users::pending_users))
        .route("/{id}", get(users::get_user).put(users::update_user))
        .route("/{id}/approve", post(users::approve_user))
        .route("/{id}/activate", post(users::activate_user))
        .route("/{id}/deactivate", post(users::deactivate_user))
        .route("/{id}/reject", post(users::reject_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Vehicle routes (protected)
    let vehicle_state = vehicles::VehicleHandlerState { db: db.clone() };
    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(vehicle_state);

    // Violation routes (protected)
    let violation_state = violations::ViolationHandlerState { db: db.clone() };
    let violation_routes = Router::new()
        .route(
            "/",
            get(violations::list_violations).post(violations::create_violation),
        )
        .route(
            "/{id}",
            get(violations::get_violation)
                .put(violations::update_violation)
                .delete(violations::delete_violation),
        )
        .route("/{id}/resolve", post(violations::resolve_violation))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(violation_state);

    // Scan routes (protected)
    let scan_state = scans::ScanHandlerState { db: db.clone() };
    let scan_routes = Router::new()
        .route("/", get(scans::list_scans).post(scans::create_scan))
        .route("/stats/daily", get(scans::daily_scan_stats))
        .route("/{id}", get(scans::get_scan).delete(scans::delete_scan))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(scan_state);

    // Analytics routes (protected)
    let analytics_state = analytics::AnalyticsState { db: db.clone() };
    let analytics_routes = Router::new()
        .route("/dashboard", get(analytics::dashboard_stats))
        .route("/violations/trends", get(analytics::violation_trends))
        .route("/scans/activity", get(analytics::scan_activity))
        .route("/vehicles/statistics", get(analytics::vehicle_statistics))
        .route("/reports/generate", get(analytics::generate_report))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(analytics_state);

    // Health routes (no auth)
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    // Prometheus scrape endpoint (no auth)
    let metrics_state = metrics::MetricsState {
        handle: prometheus_handle,
    };
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Service banner
        .route("/", get(health::service_info))
        // Health + metrics
        .merge(health_routes)
        .merge(metrics_routes)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Resources
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/violations", violation_routes)
        .nest("/api/v1/scans", scan_routes)
        .nest("/api/v1/analytics", analytics_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
