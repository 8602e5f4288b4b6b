//! Traffic violation entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Violation category
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ViolationType {
    #[sea_orm(string_value = "speeding")]
    Speeding,
    #[sea_orm(string_value = "parking")]
    Parking,
    #[sea_orm(string_value = "red-light")]
    RedLight,
    #[sea_orm(string_value = "stop-sign")]
    StopSign,
    #[sea_orm(string_value = "no-parking")]
    NoParking,
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Speeding => write!(f, "speeding"),
            Self::Parking => write!(f, "parking"),
            Self::RedLight => write!(f, "red-light"),
            Self::StopSign => write!(f, "stop-sign"),
            Self::NoParking => write!(f, "no-parking"),
        }
    }
}

/// Processing status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ViolationStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

impl Default for ViolationStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl std::fmt::Display for ViolationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// Violation model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "violations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub plate_number: String,
    pub violation_type: ViolationType,
    pub location: String,
    pub date_time: DateTime<Utc>,
    pub status: ViolationStatus,
    pub description: Option<String>,
    pub fine_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
