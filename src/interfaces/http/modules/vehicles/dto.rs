//! Vehicle registry DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::infrastructure::database::entities::vehicle::{self, VehicleStatus, VehicleType};

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: String,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vehicle_type: String,
    pub engine_number: String,
    pub chassis_number: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: String,
    pub owner_address: String,
    pub registration_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<vehicle::Model> for VehicleDto {
    fn from(v: vehicle::Model) -> Self {
        Self {
            id: v.id,
            plate_number: v.plate_number,
            make: v.make,
            model: v.model,
            year: v.year,
            color: v.color,
            vehicle_type: v.vehicle_type.to_string(),
            engine_number: v.engine_number,
            chassis_number: v.chassis_number,
            owner_name: v.owner_name,
            owner_phone: v.owner_phone,
            owner_email: v.owner_email,
            owner_address: v.owner_address,
            registration_date: v.registration_date,
            expiry_date: v.expiry_date,
            status: v.status.to_string(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 50))]
    pub make: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, max = 30))]
    pub color: String,
    /// Sedan, SUV, Truck, Hatchback, Coupe, Convertible, Motorcycle
    pub vehicle_type: String,
    #[validate(length(min = 1, max = 50))]
    pub engine_number: String,
    #[validate(length(min = 1, max = 50))]
    pub chassis_number: String,
    #[validate(length(min = 1, max = 100))]
    pub owner_name: String,
    #[validate(length(min = 1, max = 30))]
    pub owner_phone: String,
    #[validate(email)]
    pub owner_email: String,
    #[validate(length(min = 1, max = 200))]
    pub owner_address: String,
    pub registration_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// active, expired, suspended. Default: active
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 30))]
    pub color: Option<String>,
    pub vehicle_type: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub engine_number: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub chassis_number: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub owner_name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub owner_phone: Option<String>,
    #[validate(email)]
    pub owner_email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub owner_address: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListVehiclesParams {
    /// Plate number substring
    pub plate_number: Option<String>,
    /// Exact make
    pub make: Option<String>,
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    /// Search over plate, make, model, or owner name
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}

pub fn parse_vehicle_type(s: &str) -> Option<VehicleType> {
    match s.to_ascii_lowercase().as_str() {
        "sedan" => Some(VehicleType::Sedan),
        "suv" => Some(VehicleType::Suv),
        "truck" => Some(VehicleType::Truck),
        "hatchback" => Some(VehicleType::Hatchback),
        "coupe" => Some(VehicleType::Coupe),
        "convertible" => Some(VehicleType::Convertible),
        "motorcycle" => Some(VehicleType::Motorcycle),
        _ => None,
    }
}

pub fn parse_vehicle_status(s: &str) -> Option<VehicleStatus> {
    match s.to_ascii_lowercase().as_str() {
        "active" => Some(VehicleStatus::Active),
        "expired" => Some(VehicleStatus::Expired),
        "suspended" => Some(VehicleStatus::Suspended),
        _ => None,
    }
}
