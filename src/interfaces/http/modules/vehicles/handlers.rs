//! Vehicle registry handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::dto::{
    parse_vehicle_status, parse_vehicle_type, CreateVehicleRequest, ListVehiclesParams,
    UpdateVehicleRequest, VehicleDto,
};
use crate::infrastructure::database::entities::vehicle;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Vehicle handler state
#[derive(Clone)]
pub struct VehicleHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(ListVehiclesParams),
    responses(
        (status = 200, description = "Vehicle list", body = PaginatedResponse<VehicleDto>),
        (status = 400, description = "Unknown type or status selector")
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleHandlerState>,
    Query(params): Query<ListVehiclesParams>,
) -> Result<Json<PaginatedResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut query = vehicle::Entity::find().order_by_asc(vehicle::Column::CreatedAt);

    if let Some(plate) = params.plate_number.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(vehicle::Column::PlateNumber.contains(plate));
    }
    if let Some(make) = params.make.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(vehicle::Column::Make.eq(make));
    }
    if let Some(s) = params.vehicle_type.as_deref().filter(|s| !s.is_empty()) {
        let Some(vehicle_type) = parse_vehicle_type(s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown vehicle type '{}'", s))),
            ));
        };
        query = query.filter(vehicle::Column::VehicleType.eq(vehicle_type));
    }
    if let Some(s) = params.status.as_deref().filter(|s| !s.is_empty()) {
        let Some(status) = parse_vehicle_status(s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status '{}'", s))),
            ));
        };
        query = query.filter(vehicle::Column::Status.eq(status));
    }
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(vehicle::Column::PlateNumber.contains(search))
                .add(vehicle::Column::Make.contains(search))
                .add(vehicle::Column::Model.contains(search))
                .add(vehicle::Column::OwnerName.contains(search)),
        );
    }

    let total = query.clone().count(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let pagination = PaginationParams::clamped(params.page, params.page_size);
    let vehicles = query
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

    let items: Vec<VehicleDto> = vehicles.into_iter().map(VehicleDto::from).collect();
    Ok(Json(PaginatedResponse::new(
        items,
        total,
        pagination.page,
        pagination.limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
    let vehicle = vehicle::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    match vehicle {
        Some(v) => Ok(Json(ApiResponse::success(VehicleDto::from(v)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Vehicle not found")),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator role required"),
        (status = 409, description = "Plate number already registered")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), (StatusCode, Json<ApiResponse<VehicleDto>>)>
{
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

    let Some(vehicle_type) = parse_vehicle_type(&request.vehicle_type) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown vehicle type '{}'",
                request.vehicle_type
            ))),
        ));
    };
    let status = match request.status.as_deref() {
        None => vehicle::VehicleStatus::Active,
        Some(s) => match parse_vehicle_status(s) {
            Some(status) => status,
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown status '{}'", s))),
                ));
            }
        },
    };

    let existing = vehicle::Entity::find()
        .filter(vehicle::Column::PlateNumber.eq(&request.plate_number))
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Plate number already registered")),
        ));
    }

    let now = Utc::now();
    let new_vehicle = vehicle::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        plate_number: Set(request.plate_number),
        make: Set(request.make),
        model: Set(request.model),
        year: Set(request.year),
        color: Set(request.color),
        vehicle_type: Set(vehicle_type),
        engine_number: Set(request.engine_number),
        chassis_number: Set(request.chassis_number),
        owner_name: Set(request.owner_name),
        owner_phone: Set(request.owner_phone),
        owner_email: Set(request.owner_email),
        owner_address: Set(request.owner_address),
        registration_date: Set(request.registration_date),
        expiry_date: Set(request.expiry_date),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = new_vehicle.insert(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from(created))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Operator role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    current_user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
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

    let vehicle = vehicle::Entity::find_by_id(&id)
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(vehicle_model) = vehicle else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Vehicle not found")),
        ));
    };

    let mut active: vehicle::ActiveModel = vehicle_model.into();
    active.updated_at = Set(Utc::now());

    if let Some(plate) = request.plate_number {
        active.plate_number = Set(plate);
    }
    if let Some(make) = request.make {
        active.make = Set(make);
    }
    if let Some(model) = request.model {
        active.model = Set(model);
    }
    if let Some(year) = request.year {
        active.year = Set(year);
    }
    if let Some(color) = request.color {
        active.color = Set(color);
    }
    if let Some(s) = request.vehicle_type {
        let Some(vehicle_type) = parse_vehicle_type(&s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown vehicle type '{}'", s))),
            ));
        };
        active.vehicle_type = Set(vehicle_type);
    }
    if let Some(engine) = request.engine_number {
        active.engine_number = Set(engine);
    }
    if let Some(chassis) = request.chassis_number {
        active.chassis_number = Set(chassis);
    }
    if let Some(owner_name) = request.owner_name {
        active.owner_name = Set(owner_name);
    }
    if let Some(owner_phone) = request.owner_phone {
        active.owner_phone = Set(owner_phone);
    }
    if let Some(owner_email) = request.owner_email {
        active.owner_email = Set(owner_email);
    }
    if let Some(owner_address) = request.owner_address {
        active.owner_address = Set(owner_address);
    }
    if let Some(registration_date) = request.registration_date {
        active.registration_date = Set(registration_date);
    }
    if let Some(expiry_date) = request.expiry_date {
        active.expiry_date = Set(expiry_date);
    }
    if let Some(s) = request.status {
        let Some(status) = parse_vehicle_status(&s) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status '{}'", s))),
            ));
        };
        active.status = Set(status);
    }

    let updated = active.update(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(VehicleDto::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Operator role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
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

    let result = vehicle::Entity::delete_by_id(&id)
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
            Json(ApiResponse::error("Vehicle not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
