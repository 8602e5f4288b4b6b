//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetUsersDto, StatusAction, UpdateUserDto, User,
    UserFilter, UserRepositoryInterface, UserRole, UserStatus,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User service — orchestrates all identity / user-management use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    ///
    /// Only active accounts may log in; a successful login stamps
    /// `last_login`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(mut user) = self.repo.get_user_by_email(email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        if user.status != UserStatus::Active {
            return Err(DomainError::Unauthorized("Account is not active".into()));
        }

        let now = Utc::now();
        self.repo.record_login(&user.id, now).await?;
        user.last_login = Some(now);

        let token = create_token(&user.id, &user.name, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Register a new account. Registrations start out pending and must
    /// be approved by an administrator before they can log in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> DomainResult<User> {
        self.validate_draft(name, email, password).await?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                name: name.to_string(),
                email: email.to_string(),
                role,
                status: UserStatus::Pending,
                password: password.to_string(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "New registration pending approval");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// List users with search, filtering, sorting and pagination.
    pub async fn list_users(&self, dto: GetUsersDto) -> DomainResult<PaginatedResult<User>> {
        self.repo.list_users(dto).await
    }

    /// Registrations waiting for approval.
    pub async fn pending_users(&self) -> DomainResult<PaginatedResult<User>> {
        self.repo
            .list_users(GetUsersDto {
                filter: UserFilter {
                    status: Some(UserStatus::Pending),
                    ..Default::default()
                },
                page_size: Some(100),
                ..Default::default()
            })
            .await
    }

    /// Get a single user by ID.
    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    /// Get user by email.
    pub async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_email(email).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a user directly (admin console "Add New User").
    /// Unlike self-registration, the account is created active.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> DomainResult<User> {
        self.validate_draft(name, email, password).await?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                name: name.to_string(),
                email: email.to_string(),
                role,
                status: UserStatus::Active,
                password: password.to_string(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Update profile fields (name, email, role, status).
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        if dto.is_empty() {
            return Err(DomainError::Validation("No fields to update".into()));
        }
        self.repo.update_user(id, dto).await
    }

    /// Apply an administrative status action to one account.
    ///
    /// The precondition lives in the domain model; this method only
    /// orchestrates fetch, apply, persist. `NotFound` when the id is
    /// absent — nothing is mutated in that case.
    pub async fn apply_status_action(
        &self,
        id: &str,
        action: StatusAction,
    ) -> DomainResult<User> {
        let Some(mut user) = self.repo.get_user_by_id(id).await? else {
            return Err(DomainError::not_found("User", "id", id));
        };

        let now = Utc::now();
        user.apply_status_action(action, now)?;

        let last_login = matches!(action, StatusAction::Approve).then_some(now);
        let updated = self
            .repo
            .update_user_status(id, user.status, last_login)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        info!(user_id = %id, action = action.as_str(), status = updated.status.as_str(), "User status changed");
        Ok(updated)
    }

    /// Approve a pending registration (pending -> active, stamps last_login).
    pub async fn approve_user(&self, id: &str) -> DomainResult<User> {
        self.apply_status_action(id, StatusAction::Approve).await
    }

    /// Re-enable a deactivated account (inactive -> active).
    pub async fn activate_user(&self, id: &str) -> DomainResult<User> {
        self.apply_status_action(id, StatusAction::Activate).await
    }

    /// Disable an active account (active -> inactive).
    pub async fn deactivate_user(&self, id: &str) -> DomainResult<User> {
        self.apply_status_action(id, StatusAction::Deactivate).await
    }

    /// Reject a pending registration, removing the record.
    pub async fn reject_user(&self, id: &str) -> DomainResult<()> {
        let Some(user) = self.repo.get_user_by_id(id).await? else {
            return Err(DomainError::not_found("User", "id", id));
        };

        if user.status != UserStatus::Pending {
            return Err(DomainError::InvalidTransition {
                entity: "User",
                from: user.status.as_str(),
                action: "reject",
            });
        }

        self.repo.delete_user(id).await?;
        info!(user_id = %id, "Pending registration rejected");
        Ok(())
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < 8 {
            return Err(DomainError::Validation(
                "New password must be at least 8 characters".into(),
            ));
        }

        let user = self
            .repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        self.repo.update_user_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn validate_draft(&self, name: &str, email: &str, password: &str) -> DomainResult<()> {
        if name.trim().is_empty() || name.len() > 100 {
            return Err(DomainError::Validation(
                "Name must be 1-100 characters".into(),
            ));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        if self.repo.get_user_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::user::fixtures::seven_users;

    /// In-memory store mirroring the repository contract; list results
    /// come back in insertion order, like the SQL implementation.
    struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUserRepository {
        fn seeded() -> Self {
            Self {
                users: Mutex::new(seven_users()),
            }
        }

        fn snapshot(&self) -> Vec<User> {
            self.users.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserRepositoryInterface for InMemoryUserRepository {
        async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == dto.email) {
                return Err(DomainError::Conflict("Email already exists".into()));
            }
            let now = Utc::now();
            let user = User {
                id: uuid::Uuid::new_v4().to_string(),
                name: dto.name,
                email: dto.email,
                password_hash: hash_password(&dto.password).unwrap(),
                role: dto.role.unwrap_or_default(),
                status: dto.status,
                last_login: None,
                created_at: now,
                updated_at: now,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn list_users(&self, dto: GetUsersDto) -> DomainResult<PaginatedResult<User>> {
            let users = self.users.lock().unwrap();
            let matched: Vec<User> = dto.filter.apply(&users).into_iter().cloned().collect();
            let total = matched.len() as u64;
            Ok(PaginatedResult::new(
                matched,
                total,
                dto.page.unwrap_or(1),
                dto.page_size.unwrap_or(20),
            ))
        }

        async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                return Ok(None);
            };
            if let Some(name) = dto.name {
                user.name = name;
            }
            if let Some(email) = dto.email {
                user.email = email;
            }
            if let Some(role) = dto.role {
                user.role = role;
            }
            if let Some(status) = dto.status {
                user.status = status;
            }
            user.updated_at = Utc::now();
            Ok(Some(user.clone()))
        }

        async fn update_user_status(
            &self,
            id: &str,
            status: UserStatus,
            last_login: Option<DateTime<Utc>>,
        ) -> DomainResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                return Ok(None);
            };
            user.status = status;
            if let Some(at) = last_login {
                user.last_login = Some(at);
            }
            user.updated_at = Utc::now();
            Ok(Some(user.clone()))
        }

        async fn update_user_password(
            &self,
            id: &str,
            new_password_hash: &str,
        ) -> DomainResult<()> {
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                return Err(DomainError::not_found("User", "id", id));
            };
            user.password_hash = new_password_hash.to_string();
            Ok(())
        }

        async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                return Err(DomainError::not_found("User", "id", id));
            };
            user.last_login = Some(at);
            Ok(())
        }

        async fn delete_user(&self, id: &str) -> DomainResult<()> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            if users.len() == before {
                return Err(DomainError::not_found("User", "id", id));
            }
            Ok(())
        }
    }

    fn service() -> (Arc<InMemoryUserRepository>, UserService<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::seeded());
        let service = UserService::new(repo.clone(), JwtConfig::default());
        (repo, service)
    }

    #[tokio::test]
    async fn approve_pending_user_activates_and_stamps_last_login() {
        let (_, service) = service();
        let before = Utc::now();

        let user = service.approve_user("USR004").await.unwrap();

        assert_eq!(user.status, UserStatus::Active);
        assert!(user.last_login.unwrap() >= before);
    }

    #[tokio::test]
    async fn approve_active_user_is_invalid_transition() {
        let (repo, service) = service();
        let before = repo.snapshot();

        let err = service.approve_user("USR001").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        // Nothing was mutated.
        let after = repo.snapshot();
        assert_eq!(before.len(), after.len());
        assert_eq!(after[0].status, before[0].status);
    }

    #[tokio::test]
    async fn transition_on_unknown_id_is_not_found_and_store_untouched() {
        let (repo, service) = service();
        let before = repo.snapshot();

        let err = service.deactivate_user("USR999").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(repo.snapshot().len(), before.len());
    }

    #[tokio::test]
    async fn deactivate_then_activate_preserves_last_login() {
        let (_, service) = service();

        let deactivated = service.deactivate_user("USR002").await.unwrap();
        assert_eq!(deactivated.status, UserStatus::Inactive);
        let last_login = deactivated.last_login;

        let activated = service.activate_user("USR002").await.unwrap();
        assert_eq!(activated.status, UserStatus::Active);
        assert_eq!(activated.last_login, last_login);
    }

    #[tokio::test]
    async fn register_creates_pending_viewer_by_default() {
        let (_, service) = service();

        let user = service
            .register("Nadia Petrova", "nadia.petrova@vpr.local", "s3cret-pass", None)
            .await
            .unwrap();

        assert_eq!(user.status, UserStatus::Pending);
        assert_eq!(user.role, UserRole::Viewer);
        assert!(user.last_login.is_none());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_and_short_password() {
        let (_, service) = service();

        let err = service
            .register("Dup", "jane.smith@vpr.local", "long-enough", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = service
            .register("Shorty", "shorty@vpr.local", "short", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn admin_create_user_is_active_immediately() {
        let (_, service) = service();

        let user = service
            .create_user(
                "Omar Haddad",
                "omar.haddad@vpr.local",
                "s3cret-pass",
                Some(UserRole::Operator),
            )
            .await
            .unwrap();

        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.role, UserRole::Operator);
    }

    #[tokio::test]
    async fn update_with_empty_patch_is_a_validation_error() {
        let (_, service) = service();

        let err = service
            .update_user("USR001", UpdateUserDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn reject_removes_pending_registration_only() {
        let (repo, service) = service();

        service.reject_user("USR007").await.unwrap();
        assert!(repo.snapshot().iter().all(|u| u.id != "USR007"));

        let err = service.reject_user("USR001").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn pending_users_lists_only_pending() {
        let (_, service) = service();

        let pending = service.pending_users().await.unwrap();
        let ids: Vec<&str> = pending.items.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["USR004", "USR007"]);
    }
}
