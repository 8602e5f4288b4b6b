//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{User, UserRole, UserStatus};

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            status: u.status.as_str().to_string(),
            last_login: u.last_login,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Create user request ("Add New User"; account is created active)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Administrator, Operator or Viewer. Default: Viewer
    pub role: Option<String>,
}

/// Update user request. All fields optional; an empty patch is rejected.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Global search over name, email, or id
    pub search: Option<String>,
    /// Narrow filter over name or email only
    pub name_email: Option<String>,
    /// Role selector ("all" or absent: no constraint)
    pub role: Option<String>,
    /// Status selector ("all" or absent: no constraint)
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Sort field (name, email, role). Default: creation order
    pub sort_by: Option<String>,
}

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}

/// Map a role selector to a concrete filter. Absent, empty, or the
/// sentinel "all" mean no constraint; unknown values are an error.
pub fn role_filter(value: Option<&str>) -> Result<Option<UserRole>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => UserRole::parse(s)
            .map(Some)
            .ok_or_else(|| format!("Unknown role '{}'", s)),
    }
}

/// Same as [`role_filter`], for the status selector.
pub fn status_filter(value: Option<&str>) -> Result<Option<UserStatus>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => UserStatus::parse(s)
            .map(Some)
            .ok_or_else(|| format!("Unknown status '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_and_absence_mean_no_constraint() {
        assert_eq!(role_filter(None).unwrap(), None);
        assert_eq!(role_filter(Some("")).unwrap(), None);
        assert_eq!(role_filter(Some("all")).unwrap(), None);
        assert_eq!(role_filter(Some("All")).unwrap(), None);
        assert_eq!(status_filter(Some("all")).unwrap(), None);
    }

    #[test]
    fn concrete_values_parse_and_unknowns_fail() {
        assert_eq!(
            role_filter(Some("Administrator")).unwrap(),
            Some(UserRole::Administrator)
        );
        assert_eq!(
            status_filter(Some("pending")).unwrap(),
            Some(UserStatus::Pending)
        );
        assert!(role_filter(Some("root")).is_err());
        assert!(status_filter(Some("banned")).is_err());
    }
}
