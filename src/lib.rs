//! # VPR Admin Service
//!
//! Backend for a vehicle-plate-recognition administration system:
//! user account management, vehicle registry, violations, plate scans,
//! and dashboard analytics behind a JWT-authenticated REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the user filter engine and
//!   status state machine, repository traits
//! - **application**: Business logic and use cases (`UserService`)
//! - **infrastructure**: External concerns (database, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Pagination and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
