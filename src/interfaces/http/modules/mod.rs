pub mod analytics;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod scans;
pub mod users;
pub mod vehicles;
pub mod violations;
