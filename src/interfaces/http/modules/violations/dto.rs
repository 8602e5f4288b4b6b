//! Violation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::infrastructure::database::entities::violation::{
    self, ViolationStatus, ViolationType,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ViolationDto {
    pub id: String,
    pub plate_number: String,
    pub violation_type: String,
    pub location: String,
    pub date_time: DateTime<Utc>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<violation::Model> for ViolationDto {
    fn from(v: violation::Model) -> Self {
        Self {
            id: v.id,
            plate_number: v.plate_number,
            violation_type: v.violation_type.to_string(),
            location: v.location,
            date_time: v.date_time,
            status: v.status.to_string(),
            description: v.description,
            fine_amount: v.fine_amount,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateViolationRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,
    /// speeding, parking, red-light, stop-sign, no-parking
    pub violation_type: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub date_time: DateTime<Utc>,
    /// open, pending, resolved. Default: open
    pub status: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub fine_amount: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateViolationRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,
    pub violation_type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub status: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub fine_amount: Option<f64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListViolationsParams {
    /// Plate number substring
    pub plate_number: Option<String>,
    pub violation_type: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Search over plate, location, or description
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

pub fn parse_violation_type(s: &str) -> Option<ViolationType> {
    match s.to_ascii_lowercase().as_str() {
        "speeding" => Some(ViolationType::Speeding),
        "parking" => Some(ViolationType::Parking),
        "red-light" => Some(ViolationType::RedLight),
        "stop-sign" => Some(ViolationType::StopSign),
        "no-parking" => Some(ViolationType::NoParking),
        _ => None,
    }
}

pub fn parse_violation_status(s: &str) -> Option<ViolationStatus> {
    match s.to_ascii_lowercase().as_str() {
        "open" => Some(ViolationStatus::Open),
        "pending" => Some(ViolationStatus::Pending),
        "resolved" => Some(ViolationStatus::Resolved),
        _ => None,
    }
}
