//! Violation management handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Days, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::dto::{
    parse_violation_status, parse_violation_type, CreateViolationRequest, ListViolationsParams,
    UpdateViolationRequest, ViolationDto,
};
use crate::infrastructure::database::entities::violation::{self, ViolationStatus};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Violation handler state
#[derive(Clone)]
pub struct ViolationHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

#[utoipa::path(
    get,
    path = "/api/v1/violations",
    tag = "Violations",
    security(("bearer_auth" = [])),
    params(ListViolationsParams),
    responses(
        (status = 200, description = "Violation list, newest first", body = PaginatedResponse<ViolationDto>),
        (status = 400, description = "Unknown type or status selector")
    )
)]
pub async fn list_violations(
    State(state): State<ViolationHandlerState>,
    Query(params): Query<ListViolationsParams>,
) -> Result<Json<PaginatedResponse<ViolationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut query = violation::Entity::find().order_by_desc(violation::Column::DateTime);

    if let Some(plate) = params.plate_number.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(violation::Column::PlateNumber.contains(plate));
    }
    if let Some(s) = params.violation_type.as_deref().filter(|s| !s.is_empty()) {
        let Some(violation_type) = parse_violation_type(s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Unknown violation type '{}'",
                    s
                ))),
            ));
        };
        query = query.filter(violation::Column::ViolationType.eq(violation_type));
    }
    if let Some(s) = params.status.as_deref().filter(|s| !s.is_empty()) {
        let Some(status) = parse_violation_status(s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status '{}'", s))),
            ));
        };
        query = query.filter(violation::Column::Status.eq(status));
    }
    if let Some(from) = params.date_from {
        let start = from.and_time(NaiveTime::MIN).and_utc();
        query = query.filter(violation::Column::DateTime.gte(start));
    }
    if let Some(to) = params.date_to {
        // End bound is inclusive of the whole day.
        let end = to
            .checked_add_days(Days::new(1))
            .unwrap_or(to)
            .and_time(NaiveTime::MIN)
            .and_utc();
        query = query.filter(violation::Column::DateTime.lt(end));
    }
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(violation::Column::PlateNumber.contains(search))
                .add(violation::Column::Location.contains(search))
                .add(violation::Column::Description.contains(search)),
        );
    }

    let total = query.clone().count(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let pagination = PaginationParams::clamped(params.page, params.page_size);
    let violations = query
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

    let items: Vec<ViolationDto> = violations.into_iter().map(ViolationDto::from).collect();
    Ok(Json(PaginatedResponse::new(
        items,
        total,
        pagination.page,
        pagination.limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/violations/{id}",
    tag = "Violations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Violation ID")),
    responses(
        (status = 200, description = "Violation details", body = ApiResponse<ViolationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_violation(
    State(state): State<ViolationHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ViolationDto>>, (StatusCode, Json<ApiResponse<ViolationDto>>)> {
    let violation = violation::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    match violation {
        Some(v) => Ok(Json(ApiResponse::success(ViolationDto::from(v)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Violation not found")),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/violations",
    tag = "Violations",
    security(("bearer_auth" = [])),
    request_body = CreateViolationRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ViolationDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator role required")
    )
)]
pub async fn create_violation(
    State(state): State<ViolationHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateViolationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ViolationDto>>),
    (StatusCode, Json<ApiResponse<ViolationDto>>),
> {
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

    let Some(violation_type) = parse_violation_type(&request.violation_type) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown violation type '{}'",
                request.violation_type
            ))),
        ));
    };
    let status = match request.status.as_deref() {
        None => ViolationStatus::Open,
        Some(s) => match parse_violation_status(s) {
            Some(status) => status,
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown status '{}'", s))),
                ));
            }
        },
    };

    let now = Utc::now();
    let new_violation = violation::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        plate_number: Set(request.plate_number),
        violation_type: Set(violation_type),
        location: Set(request.location),
        date_time: Set(request.date_time),
        status: Set(status),
        description: Set(request.description),
        fine_amount: Set(request.fine_amount),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = new_violation.insert(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ViolationDto::from(created))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/violations/{id}",
    tag = "Violations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Violation ID")),
    request_body = UpdateViolationRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ViolationDto>),
        (status = 403, description = "Operator role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_violation(
    State(state): State<ViolationHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateViolationRequest>,
) -> Result<Json<ApiResponse<ViolationDto>>, (StatusCode, Json<ApiResponse<ViolationDto>>)> {
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

    let violation = violation::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(violation_model) = violation else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Violation not found")),
        ));
    };

    let mut active: violation::ActiveModel = violation_model.into();
    active.updated_at = Set(Utc::now());

    if let Some(plate) = request.plate_number {
        active.plate_number = Set(plate);
    }
    if let Some(s) = request.violation_type {
        let Some(violation_type) = parse_violation_type(&s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Unknown violation type '{}'",
                    s
                ))),
            ));
        };
        active.violation_type = Set(violation_type);
    }
    if let Some(location) = request.location {
        active.location = Set(location);
    }
    if let Some(date_time) = request.date_time {
        active.date_time = Set(date_time);
    }
    if let Some(s) = request.status {
        let Some(status) = parse_violation_status(&s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status '{}'", s))),
            ));
        };
        active.status = Set(status);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(fine_amount) = request.fine_amount {
        active.fine_amount = Set(Some(fine_amount));
    }

    let updated = active.update(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(ViolationDto::from(updated))))
}

#[utoipa::path(
    post,
    path = "/api/v1/violations/{id}/resolve",
    tag = "Violations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Violation ID")),
    responses(
        (status = 200, description = "Marked resolved", body = ApiResponse<ViolationDto>),
        (status = 403, description = "Operator role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn resolve_violation(
    State(state): State<ViolationHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ViolationDto>>, (StatusCode, Json<ApiResponse<ViolationDto>>)> {
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

    let violation = violation::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(violation_model) = violation else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Violation not found")),
        ));
    };

    let mut active: violation::ActiveModel = violation_model.into();
    active.status = Set(ViolationStatus::Resolved);
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(ViolationDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/violations/{id}",
    tag = "Violations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Violation ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Operator role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_violation(
    State(state): State<ViolationHandlerState>,
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

    let result = violation::Entity::delete_by_id(&id)
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
            Json(ApiResponse::error("Violation not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
