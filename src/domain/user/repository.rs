use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CreateUserDto, GetUsersDto, UpdateUserDto, User, UserStatus};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

/// Data-access contract for user records.
///
/// List results come back in store order (creation order) unless the
/// query requests an explicit sort.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self, dto: GetUsersDto) -> DomainResult<PaginatedResult<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;

    /// Persist a status change, optionally stamping `last_login`
    /// (approval does; the other transitions pass `None`).
    async fn update_user_status(
        &self,
        id: &str,
        status: UserStatus,
        last_login: Option<DateTime<Utc>>,
    ) -> DomainResult<Option<User>>;

    async fn update_user_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()>;

    /// Stamp `last_login` after a successful authentication.
    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;

    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
