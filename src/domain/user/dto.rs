use super::filter::UserFilter;
use super::model::{UserRole, UserStatus};

/// Draft for a new user record.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub status: UserStatus,
    pub password: String,
}

/// Field patch for an existing record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.status.is_none()
    }
}

/// List query: filter plus pagination and sorting.
#[derive(Debug, Clone, Default)]
pub struct GetUsersDto {
    pub filter: UserFilter,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Sort field (name, email, role). Default: store order.
    pub sort_by: Option<String>,
}
