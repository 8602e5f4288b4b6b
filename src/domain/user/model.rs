use chrono::{DateTime, Utc};

use crate::domain::error::{DomainError, DomainResult};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Administrator,
    Operator,
    Viewer,
}

impl UserRole {
    /// Wire representation, as stored and served.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Administrator => "Administrator",
            UserRole::Operator => "Operator",
            UserRole::Viewer => "Viewer",
        }
    }

    /// Parse a wire value. Case-insensitive; `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "administrator" => Some(UserRole::Administrator),
            "operator" => Some(UserRole::Operator),
            "viewer" => Some(UserRole::Viewer),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Viewer
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            "pending" => Some(UserStatus::Pending),
            _ => None,
        }
    }
}

/// Administrative status actions on a user account.
///
/// Each action is valid from exactly one status. The precondition is
/// enforced by [`User::apply_status_action`], not by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// inactive -> active
    Activate,
    /// active -> inactive
    Deactivate,
    /// pending -> active; stamps `last_login`
    Approve,
}

impl StatusAction {
    /// Status the account must currently have for this action to apply.
    pub fn expected_status(&self) -> UserStatus {
        match self {
            StatusAction::Activate => UserStatus::Inactive,
            StatusAction::Deactivate => UserStatus::Active,
            StatusAction::Approve => UserStatus::Pending,
        }
    }

    /// Status the account ends up in.
    pub fn target_status(&self) -> UserStatus {
        match self {
            StatusAction::Activate | StatusAction::Approve => UserStatus::Active,
            StatusAction::Deactivate => UserStatus::Inactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAction::Activate => "activate",
            StatusAction::Deactivate => "deactivate",
            StatusAction::Approve => "approve",
        }
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply an administrative status action to this account.
    ///
    /// Fails with `InvalidTransition` (leaving the record untouched) when
    /// the current status does not match the action's expected status.
    /// Approval stamps `last_login` with `now`; the other actions leave
    /// it as-is.
    pub fn apply_status_action(
        &mut self,
        action: StatusAction,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != action.expected_status() {
            return Err(DomainError::InvalidTransition {
                entity: "User",
                from: self.status.as_str(),
                action: action.as_str(),
            });
        }

        self.status = action.target_status();
        if matches!(action, StatusAction::Approve) {
            self.last_login = Some(now);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures::seven_users;

    fn user_by_id<'a>(users: &'a mut [User], id: &str) -> &'a mut User {
        users.iter_mut().find(|u| u.id == id).unwrap()
    }

    #[test]
    fn approve_pending_activates_and_stamps_last_login() {
        let mut users = seven_users();
        let before = Utc::now();
        let user = user_by_id(&mut users, "USR004");
        assert_eq!(user.status, UserStatus::Pending);
        assert!(user.last_login.is_none());

        user.apply_status_action(StatusAction::Approve, Utc::now())
            .unwrap();

        assert_eq!(user.status, UserStatus::Active);
        assert!(user.last_login.unwrap() >= before);
    }

    #[test]
    fn deactivate_active_leaves_last_login_untouched() {
        let mut users = seven_users();
        let user = user_by_id(&mut users, "USR001");
        let last_login = user.last_login;
        assert_eq!(user.status, UserStatus::Active);

        user.apply_status_action(StatusAction::Deactivate, Utc::now())
            .unwrap();

        assert_eq!(user.status, UserStatus::Inactive);
        assert_eq!(user.last_login, last_login);
    }

    #[test]
    fn activate_inactive_leaves_last_login_untouched() {
        let mut users = seven_users();
        let user = user_by_id(&mut users, "USR003");
        let last_login = user.last_login;
        assert_eq!(user.status, UserStatus::Inactive);

        user.apply_status_action(StatusAction::Activate, Utc::now())
            .unwrap();

        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.last_login, last_login);
    }

    #[test]
    fn mismatched_precondition_is_rejected_and_record_untouched() {
        let mut users = seven_users();
        let user = user_by_id(&mut users, "USR001");
        let snapshot = user.clone();

        // USR001 is active: only Deactivate is valid.
        for action in [StatusAction::Activate, StatusAction::Approve] {
            let err = user.apply_status_action(action, Utc::now()).unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition { .. }));
            assert_eq!(user.status, snapshot.status);
            assert_eq!(user.last_login, snapshot.last_login);
        }
    }

    #[test]
    fn approve_twice_fails_the_second_time() {
        let mut users = seven_users();
        let user = user_by_id(&mut users, "USR004");

        user.apply_status_action(StatusAction::Approve, Utc::now())
            .unwrap();
        let err = user
            .apply_status_action(StatusAction::Approve, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition { from: "active", .. }
        ));
    }

    #[test]
    fn role_and_status_wire_values_round_trip() {
        for role in [UserRole::Administrator, UserRole::Operator, UserRole::Viewer] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending] {
            assert_eq!(UserStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(UserRole::parse("root"), None);
        assert_eq!(UserStatus::parse("disabled"), None);
    }
}
