//! Visible-subset computation for the user table.
//!
//! Four independent inputs combined with logical AND; evaluation is
//! total (an empty input or an absent selector never constrains) and
//! order-preserving. An empty result is a valid outcome, not an error.

use super::model::{User, UserRole, UserStatus};

/// Combined filter inputs for the user list.
///
/// `None` — and, for the text inputs, an empty or whitespace-only
/// string — means "no constraint on this field".
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring over name, email, or id.
    pub search: Option<String>,
    /// Case-insensitive substring over name or email (id not considered).
    pub name_email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        active(&self.search).is_none()
            && active(&self.name_email).is_none()
            && self.role.is_none()
            && self.status.is_none()
    }

    /// Whether a single record satisfies all active constraints.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(q) = active(&self.search) {
            let q = q.to_lowercase();
            if !(contains_ci(&user.name, &q)
                || contains_ci(&user.email, &q)
                || contains_ci(&user.id, &q))
            {
                return false;
            }
        }

        if let Some(q) = active(&self.name_email) {
            let q = q.to_lowercase();
            if !(contains_ci(&user.name, &q) || contains_ci(&user.email, &q)) {
                return false;
            }
        }

        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }

        if let Some(status) = self.status {
            if user.status != status {
                return false;
            }
        }

        true
    }

    /// The ordered subsequence of `users` satisfying all constraints.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

fn active(opt: &Option<String>) -> Option<&str> {
    opt.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures::seven_users;

    fn ids<'a>(matched: &'a [&'a User]) -> Vec<&'a str> {
        matched.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let users = seven_users();
        let filter = UserFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&users).len(), users.len());
    }

    #[test]
    fn whitespace_search_is_identity() {
        let users = seven_users();
        let filter = UserFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&users).len(), users.len());
    }

    #[test]
    fn output_is_an_order_preserving_subsequence() {
        let users = seven_users();
        let filter = UserFilter {
            status: Some(UserStatus::Active),
            ..Default::default()
        };
        let matched = filter.apply(&users);

        // Every matched record appears in the source, in source order.
        let mut source = users.iter();
        for m in &matched {
            assert!(source.any(|u| u.id == m.id));
        }
    }

    #[test]
    fn global_search_covers_id_but_name_email_filter_does_not() {
        let users = seven_users();

        let by_search = UserFilter {
            search: Some("usr004".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_search.apply(&users)), vec!["USR004"]);

        let by_name_email = UserFilter {
            name_email: Some("usr004".to_string()),
            ..Default::default()
        };
        assert!(by_name_email.apply(&users).is_empty());
    }

    #[test]
    fn name_email_filter_finds_jane_smith_only() {
        let users = seven_users();
        let filter = UserFilter {
            name_email: Some("jane".to_string()),
            ..Default::default()
        };
        let matched = filter.apply(&users);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Jane Smith");
    }

    #[test]
    fn concrete_selectors_constrain_to_exact_field_values() {
        let users = seven_users();
        let filter = UserFilter {
            role: Some(UserRole::Operator),
            ..Default::default()
        };
        let matched = filter.apply(&users);
        assert!(!matched.is_empty());
        assert!(matched.iter().all(|u| u.role == UserRole::Operator));
    }

    #[test]
    fn admin_active_returns_usr001_and_usr005_in_order() {
        let users = seven_users();
        let filter = UserFilter {
            role: Some(UserRole::Administrator),
            status: Some(UserStatus::Active),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&users)), vec!["USR001", "USR005"]);
    }

    #[test]
    fn combining_filters_commutes() {
        let users = seven_users();

        let by_role = UserFilter {
            role: Some(UserRole::Administrator),
            ..Default::default()
        };
        let by_status = UserFilter {
            status: Some(UserStatus::Active),
            ..Default::default()
        };

        // role-then-status
        let step1: Vec<User> = by_role.apply(&users).into_iter().cloned().collect();
        let role_then_status = ids(&by_status.apply(&step1))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        // status-then-role
        let step2: Vec<User> = by_status.apply(&users).into_iter().cloned().collect();
        let status_then_role = ids(&by_role.apply(&step2))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        assert_eq!(role_then_status, status_then_role);
        assert_eq!(role_then_status, vec!["USR001", "USR005"]);
    }

    #[test]
    fn no_match_is_an_empty_result_not_an_error() {
        let users = seven_users();
        let filter = UserFilter {
            search: Some("zz-no-such-user".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(&users).is_empty());
    }
}
