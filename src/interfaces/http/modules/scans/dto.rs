//! Plate scan DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::infrastructure::database::entities::scan;

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanDto {
    pub id: String,
    pub plate_number: String,
    pub location: String,
    pub scan_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<scan::Model> for ScanDto {
    fn from(s: scan::Model) -> Self {
        Self {
            id: s.id,
            plate_number: s.plate_number,
            location: s.location,
            scan_time: s.scan_time,
            confidence_score: s.confidence_score,
            image_url: s.image_url,
            camera_id: s.camera_id,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScanRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub scan_time: DateTime<Utc>,
    /// Recognition confidence in [0, 1]
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence_score: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub camera_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListScansParams {
    /// Plate number substring
    pub plate_number: Option<String>,
    /// Location substring
    pub location: Option<String>,
    /// Exact camera ID
    pub camera_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Search over plate, location, or camera
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

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyStatsParams {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Scan count for one calendar day
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyScanCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Daily scan statistics over a date range
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyScanStats {
    pub total_scans: u64,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub daily: Vec<DailyScanCount>,
}
