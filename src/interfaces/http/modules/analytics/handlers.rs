//! Analytics handlers
//!
//! Aggregate statistics for the admin dashboard: KPI counts, violation
//! trends, scan activity, vehicle registry breakdowns, and JSON reports.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Days, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveEnum, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::dto::{
    ActivityParams, DashboardKpis, DashboardStats, RecentActivity, Report, ReportParams,
    ScanActivity, TrendsParams, VehicleStatistics, ViolationTrends,
};
use crate::infrastructure::database::entities::{scan, user, vehicle, violation};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::scans::dto::ScanDto;
use crate::interfaces::http::modules::users::dto::UserDto;
use crate::interfaces::http::modules::vehicles::dto::VehicleDto;
use crate::interfaces::http::modules::violations::dto::ViolationDto;

/// Analytics handler state
#[derive(Clone)]
pub struct AnalyticsState {
    pub db: sea_orm::DatabaseConnection,
}

type HandlerError<T> = (StatusCode, Json<ApiResponse<T>>);

fn internal<T, E: std::fmt::Display>(e: E) -> HandlerError<T> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

fn day_start(date: NaiveDate) -> chrono::DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end_exclusive(date: NaiveDate) -> chrono::DateTime<Utc> {
    day_start(date.checked_add_days(Days::new(1)).unwrap_or(date))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/dashboard",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics and KPIs", body = ApiResponse<DashboardStats>)
    )
)]
pub async fn dashboard_stats(
    State(state): State<AnalyticsState>,
) -> Result<Json<ApiResponse<DashboardStats>>, HandlerError<DashboardStats>> {
    let db = &state.db;

    let total_scans = scan::Entity::find().count(db).await.map_err(internal)?;

    let total_violations = violation::Entity::find().count(db).await.map_err(internal)?;
    let active_violations = violation::Entity::find()
        .filter(violation::Column::Status.ne(violation::ViolationStatus::Resolved))
        .count(db)
        .await
        .map_err(internal)?;
    let resolved_violations = total_violations.saturating_sub(active_violations);

    let total_vehicles = vehicle::Entity::find().count(db).await.map_err(internal)?;

    let active_users = user::Entity::find()
        .filter(user::Column::Status.eq(user::UserStatus::Active))
        .count(db)
        .await
        .map_err(internal)?;
    let pending_approvals = user::Entity::find()
        .filter(user::Column::Status.eq(user::UserStatus::Pending))
        .count(db)
        .await
        .map_err(internal)?;

    let month_ago = Utc::now() - Duration::days(30);
    let scans_last_30_days = scan::Entity::find()
        .filter(scan::Column::ScanTime.gte(month_ago))
        .count(db)
        .await
        .map_err(internal)?;
    let violations_last_30_days = violation::Entity::find()
        .filter(violation::Column::DateTime.gte(month_ago))
        .count(db)
        .await
        .map_err(internal)?;

    Ok(Json(ApiResponse::success(DashboardStats {
        kpis: DashboardKpis {
            total_scans,
            active_violations,
            resolved_violations,
            total_vehicles,
            active_users,
            pending_approvals,
        },
        recent_activity: RecentActivity {
            scans_last_30_days,
            violations_last_30_days,
        },
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/violations/trends",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    params(TrendsParams),
    responses(
        (status = 200, description = "Violation trends over a trailing window", body = ApiResponse<ViolationTrends>),
        (status = 400, description = "Window out of range")
    )
)]
pub async fn violation_trends(
    State(state): State<AnalyticsState>,
    Query(params): Query<TrendsParams>,
) -> Result<Json<ApiResponse<ViolationTrends>>, HandlerError<ViolationTrends>> {
    if params.days < 1 || params.days > 365 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("days must be between 1 and 365")),
        ));
    }

    let end_date = Utc::now().date_naive();
    let start_date = end_date - Duration::days(params.days as i64);

    let violations = violation::Entity::find()
        .filter(violation::Column::DateTime.gte(day_start(start_date)))
        .filter(violation::Column::DateTime.lt(day_end_exclusive(end_date)))
        .all(&state.db)
        .await
        .map_err(internal)?;

    let mut by_type: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
    for v in &violations {
        *by_type.entry(v.violation_type.to_string()).or_insert(0) += 1;
        *by_status.entry(v.status.to_string()).or_insert(0) += 1;
    }

    Ok(Json(ApiResponse::success(ViolationTrends {
        period_days: params.days,
        start_date,
        end_date,
        total_violations: violations.len() as u64,
        by_type,
        by_status,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/scans/activity",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    params(ActivityParams),
    responses(
        (status = 200, description = "Scan activity over a trailing window", body = ApiResponse<ScanActivity>),
        (status = 400, description = "Window out of range")
    )
)]
pub async fn scan_activity(
    State(state): State<AnalyticsState>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<ApiResponse<ScanActivity>>, HandlerError<ScanActivity>> {
    if params.days < 1 || params.days > 30 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("days must be between 1 and 30")),
        ));
    }

    let since = Utc::now() - Duration::days(params.days as i64);
    let scans = scan::Entity::find()
        .filter(scan::Column::ScanTime.gte(since))
        .all(&state.db)
        .await
        .map_err(internal)?;

    let mut by_location: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_camera: BTreeMap<String, u64> = BTreeMap::new();
    for s in &scans {
        *by_location.entry(s.location.clone()).or_insert(0) += 1;
        let camera = s.camera_id.clone().unwrap_or_else(|| "unknown".to_string());
        *by_camera.entry(camera).or_insert(0) += 1;
    }

    let total = scans.len() as u64;
    Ok(Json(ApiResponse::success(ScanActivity {
        period_days: params.days,
        total_scans: total,
        by_location,
        by_camera,
        daily_average: total as f64 / params.days as f64,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/vehicles/statistics",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle registry statistics", body = ApiResponse<VehicleStatistics>)
    )
)]
pub async fn vehicle_statistics(
    State(state): State<AnalyticsState>,
) -> Result<Json<ApiResponse<VehicleStatistics>>, HandlerError<VehicleStatistics>> {
    let vehicles = vehicle::Entity::find()
        .all(&state.db)
        .await
        .map_err(internal)?;

    let expiry_threshold = Utc::now().date_naive() + Duration::days(30);

    let mut by_make: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_type: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut expiring_soon = 0;
    for v in &vehicles {
        *by_make.entry(v.make.clone()).or_insert(0) += 1;
        *by_type.entry(v.vehicle_type.to_string()).or_insert(0) += 1;
        *by_status.entry(v.status.to_string()).or_insert(0) += 1;
        if v.expiry_date <= expiry_threshold {
            expiring_soon += 1;
        }
    }

    Ok(Json(ApiResponse::success(VehicleStatistics {
        total_vehicles: vehicles.len() as u64,
        by_make,
        by_type,
        by_status,
        expiring_soon,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/reports/generate",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    params(ReportParams),
    responses(
        (status = 200, description = "Generated report", body = ApiResponse<Report>),
        (status = 400, description = "Unknown report type")
    )
)]
pub async fn generate_report(
    State(state): State<AnalyticsState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ApiResponse<Report>>, HandlerError<Report>> {
    let generated_by = current_user
        .map(|Extension(u)| u.name)
        .unwrap_or_else(|| "unknown".to_string());

    let today = Utc::now().date_naive();
    let date_from = params.date_from.unwrap_or(today - Duration::days(30));
    let date_to = params.date_to.unwrap_or(today);
    let start = day_start(date_from);
    let end = day_end_exclusive(date_to);

    let data = match params.report_type.as_str() {
        "violations" => {
            let rows = violation::Entity::find()
                .filter(violation::Column::DateTime.gte(start))
                .filter(violation::Column::DateTime.lt(end))
                .all(&state.db)
                .await
                .map_err(internal)?;
            let dtos: Vec<ViolationDto> = rows.into_iter().map(ViolationDto::from).collect();
            serde_json::to_value(dtos).map_err(internal)?
        }
        "scans" => {
            let rows = scan::Entity::find()
                .filter(scan::Column::ScanTime.gte(start))
                .filter(scan::Column::ScanTime.lt(end))
                .all(&state.db)
                .await
                .map_err(internal)?;
            let dtos: Vec<ScanDto> = rows.into_iter().map(ScanDto::from).collect();
            serde_json::to_value(dtos).map_err(internal)?
        }
        "vehicles" => {
            let rows = vehicle::Entity::find()
                .all(&state.db)
                .await
                .map_err(internal)?;
            let dtos: Vec<VehicleDto> = rows.into_iter().map(VehicleDto::from).collect();
            serde_json::to_value(dtos).map_err(internal)?
        }
        "users" => {
            let rows = user::Entity::find().all(&state.db).await.map_err(internal)?;
            // Password hashes never leave the database layer.
            let dtos: Vec<UserDto> = rows
                .into_iter()
                .map(|m| UserDto {
                    id: m.id,
                    name: m.name,
                    email: m.email,
                    role: m.role.to_value(),
                    status: m.status.to_value(),
                    last_login: m.last_login,
                    created_at: m.created_at,
                    updated_at: m.updated_at,
                })
                .collect();
            serde_json::to_value(dtos).map_err(internal)?
        }
        other => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Unknown report type '{}'",
                    other
                ))),
            ));
        }
    };

    let total_records = data.as_array().map(Vec::len).unwrap_or(0);

    Ok(Json(ApiResponse::success(Report {
        report_type: params.report_type,
        generated_at: Utc::now(),
        date_from,
        date_to,
        generated_by,
        total_records,
        data,
    })))
}
