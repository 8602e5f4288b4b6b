//! Vehicle registry entity

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registration status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum VehicleStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl Default for VehicleStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

/// Body type
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum VehicleType {
    #[sea_orm(string_value = "Sedan")]
    Sedan,
    #[sea_orm(string_value = "SUV")]
    Suv,
    #[sea_orm(string_value = "Truck")]
    Truck,
    #[sea_orm(string_value = "Hatchback")]
    Hatchback,
    #[sea_orm(string_value = "Coupe")]
    Coupe,
    #[sea_orm(string_value = "Convertible")]
    Convertible,
    #[sea_orm(string_value = "Motorcycle")]
    Motorcycle,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sedan => write!(f, "Sedan"),
            Self::Suv => write!(f, "SUV"),
            Self::Truck => write!(f, "Truck"),
            Self::Hatchback => write!(f, "Hatchback"),
            Self::Coupe => write!(f, "Coupe"),
            Self::Convertible => write!(f, "Convertible"),
            Self::Motorcycle => write!(f, "Motorcycle"),
        }
    }
}

/// Vehicle model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vehicle_type: VehicleType,
    pub engine_number: String,
    pub chassis_number: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: String,
    pub owner_address: String,
    pub registration_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
