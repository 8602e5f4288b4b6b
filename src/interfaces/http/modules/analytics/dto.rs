//! Analytics DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Dashboard KPI block
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardKpis {
    pub total_scans: u64,
    pub active_violations: u64,
    pub resolved_violations: u64,
    pub total_vehicles: u64,
    pub active_users: u64,
    pub pending_approvals: u64,
}

/// Recent activity block (trailing 30 days)
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentActivity {
    pub scans_last_30_days: u64,
    pub violations_last_30_days: u64,
}

/// Dashboard statistics response
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub kpis: DashboardKpis,
    pub recent_activity: RecentActivity,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrendsParams {
    /// Window length in days (1-365). Default: 30
    #[serde(default = "default_trend_days")]
    pub days: u32,
}

fn default_trend_days() -> u32 {
    30
}

/// Violation counts over a trailing window
#[derive(Debug, Serialize, ToSchema)]
pub struct ViolationTrends {
    pub period_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_violations: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityParams {
    /// Window length in days (1-30). Default: 7
    #[serde(default = "default_activity_days")]
    pub days: u32,
}

fn default_activity_days() -> u32 {
    7
}

/// Scan counts over a trailing window
#[derive(Debug, Serialize, ToSchema)]
pub struct ScanActivity {
    pub period_days: u32,
    pub total_scans: u64,
    pub by_location: BTreeMap<String, u64>,
    pub by_camera: BTreeMap<String, u64>,
    pub daily_average: f64,
}

/// Vehicle registry statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleStatistics {
    pub total_vehicles: u64,
    pub by_make: BTreeMap<String, u64>,
    pub by_type: BTreeMap<String, u64>,
    pub by_status: BTreeMap<String, u64>,
    /// Registrations expiring within 30 days
    pub expiring_soon: u64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportParams {
    /// violations, scans, vehicles, or users
    pub report_type: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Generated report envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct Report {
    pub report_type: String,
    pub generated_at: DateTime<Utc>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub generated_by: String,
    pub total_records: usize,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}
