//! Shared user fixture for domain tests.

use chrono::{TimeZone, Utc};

use super::model::{User, UserRole, UserStatus};

fn user(
    seq: u32,
    id: &str,
    name: &str,
    email: &str,
    role: UserRole,
    status: UserStatus,
    has_logged_in: bool,
) -> User {
    let created = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, seq).unwrap();
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        role,
        status,
        last_login: has_logged_in.then(|| Utc.with_ymd_and_hms(2025, 2, 1, 8, 30, seq).unwrap()),
        created_at: created,
        updated_at: created,
    }
}

/// The seven-record fixture used across filter and transition tests.
pub fn seven_users() -> Vec<User> {
    vec![
        user(
            1,
            "USR001",
            "John Anderson",
            "john.anderson@vpr.local",
            UserRole::Administrator,
            UserStatus::Active,
            true,
        ),
        user(
            2,
            "USR002",
            "Jane Smith",
            "jane.smith@vpr.local",
            UserRole::Operator,
            UserStatus::Active,
            true,
        ),
        user(
            3,
            "USR003",
            "Mike Chen",
            "mike.chen@vpr.local",
            UserRole::Viewer,
            UserStatus::Inactive,
            true,
        ),
        user(
            4,
            "USR004",
            "Sara Velasquez",
            "sara.velasquez@vpr.local",
            UserRole::Operator,
            UserStatus::Pending,
            false,
        ),
        user(
            5,
            "USR005",
            "David Okafor",
            "david.okafor@vpr.local",
            UserRole::Administrator,
            UserStatus::Active,
            true,
        ),
        user(
            6,
            "USR006",
            "Emily Fontaine",
            "emily.fontaine@vpr.local",
            UserRole::Operator,
            UserStatus::Inactive,
            true,
        ),
        user(
            7,
            "USR007",
            "Tomas Lindqvist",
            "tomas.lindqvist@vpr.local",
            UserRole::Viewer,
            UserStatus::Pending,
            false,
        ),
    ]
}
