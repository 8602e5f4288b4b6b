//! Plate scan entity
//!
//! One row per camera read. Scans are append-only; there is no update
//! surface for them.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scan model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub plate_number: String,
    pub location: String,
    pub scan_time: DateTime<Utc>,
    pub confidence_score: Option<f64>,
    pub image_url: Option<String>,
    pub camera_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
