//! Plate scan handlers

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::dto::{
    CreateScanRequest, DailyScanCount, DailyScanStats, DailyStatsParams, ListScansParams, ScanDto,
};
use crate::infrastructure::database::entities::scan;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Scan handler state
#[derive(Clone)]
pub struct ScanHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

fn day_start(date: NaiveDate) -> chrono::DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end_exclusive(date: NaiveDate) -> chrono::DateTime<Utc> {
    day_start(date.checked_add_days(Days::new(1)).unwrap_or(date))
}

#[utoipa::path(
    get,
    path = "/api/v1/scans",
    tag = "Scans",
    security(("bearer_auth" = [])),
    params(ListScansParams),
    responses(
        (status = 200, description = "Scan list, newest first", body = PaginatedResponse<ScanDto>)
    )
)]
pub async fn list_scans(
    State(state): State<ScanHandlerState>,
    Query(params): Query<ListScansParams>,
) -> Result<Json<PaginatedResponse<ScanDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut query = scan::Entity::find().order_by_desc(scan::Column::ScanTime);

    if let Some(plate) = params.plate_number.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(scan::Column::PlateNumber.contains(plate));
    }
    if let Some(location) = params.location.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(scan::Column::Location.contains(location));
    }
    if let Some(camera_id) = params.camera_id.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(scan::Column::CameraId.eq(camera_id));
    }
    if let Some(from) = params.date_from {
        query = query.filter(scan::Column::ScanTime.gte(day_start(from)));
    }
    if let Some(to) = params.date_to {
        query = query.filter(scan::Column::ScanTime.lt(day_end_exclusive(to)));
    }
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(scan::Column::PlateNumber.contains(search))
                .add(scan::Column::Location.contains(search))
                .add(scan::Column::CameraId.contains(search)),
        );
    }

    let total = query.clone().count(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let pagination = PaginationParams::clamped(params.page, params.page_size);
    let scans = query
        .offset(pagination.offset())
        .limit(pagination.limit as u64)
        .all(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let items: Vec<ScanDto> = scans.into_iter().map(ScanDto::from).collect();
    Ok(Json(PaginatedResponse::new(
        items,
        total,
        pagination.page,
        pagination.limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/scans/{id}",
    tag = "Scans",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Scan ID")),
    responses(
        (status = 200, description = "Scan details", body = ApiResponse<ScanDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_scan(
    State(state): State<ScanHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ScanDto>>, (StatusCode, Json<ApiResponse<ScanDto>>)> {
    let scan = scan::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    match scan {
        Some(s) => Ok(Json(ApiResponse::success(ScanDto::from(s)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Scan not found")),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/scans",
    tag = "Scans",
    security(("bearer_auth" = [])),
    request_body = CreateScanRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ScanDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator role required")
    )
)]
pub async fn create_scan(
    State(state): State<ScanHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateScanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScanDto>>), (StatusCode, Json<ApiResponse<ScanDto>>)> {
    let Some(Extension(current)) = current_user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };
    if !current.is_operator() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Operator role required")),
        ));
    }

    let new_scan = scan::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        plate_number: Set(request.plate_number),
        location: Set(request.location),
        scan_time: Set(request.scan_time),
        confidence_score: Set(request.confidence_score),
        image_url: Set(request.image_url),
        camera_id: Set(request.camera_id),
        created_at: Set(Utc::now()),
    };

    let created = new_scan.insert(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ScanDto::from(created))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/scans/stats/daily",
    tag = "Scans",
    security(("bearer_auth" = [])),
    params(DailyStatsParams),
    responses(
        (status = 200, description = "Per-day scan counts", body = ApiResponse<DailyScanStats>)
    )
)]
pub async fn daily_scan_stats(
    State(state): State<ScanHandlerState>,
    Query(params): Query<DailyStatsParams>,
) -> Result<Json<ApiResponse<DailyScanStats>>, (StatusCode, Json<ApiResponse<DailyScanStats>>)> {
    let mut query = scan::Entity::find();

    if let Some(from) = params.date_from {
        query = query.filter(scan::Column::ScanTime.gte(day_start(from)));
    }
    if let Some(to) = params.date_to {
        query = query.filter(scan::Column::ScanTime.lt(day_end_exclusive(to)));
    }

    let scans = query.all(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for s in &scans {
        *per_day.entry(s.scan_time.date_naive()).or_insert(0) += 1;
    }

    let stats = DailyScanStats {
        total_scans: scans.len() as u64,
        date_from: params.date_from,
        date_to: params.date_to,
        daily: per_day
            .into_iter()
            .map(|(date, count)| DailyScanCount { date, count })
            .collect(),
    };

    Ok(Json(ApiResponse::success(stats)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/scans/{id}",
    tag = "Scans",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Scan ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Operator role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_scan(
    State(state): State<ScanHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(Extension(current)) = current_user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };
    if !current.is_operator() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Operator role required")),
        ));
    }

    let result = scan::Entity::delete_by_id(&id)
        .exec(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    if result.rows_affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Scan not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
