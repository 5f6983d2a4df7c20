//! User accounts and roles.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a user.
pub type UserId = u64;

/// Role of a user account.
///
/// This is a closed set, not a hierarchy: every authorization check lists
/// exactly the roles it accepts. `Admin` does not imply `Superadmin` and
/// `Superadmin` does not imply `Admin`. `Superadmin` exists solely for
/// bootstrap and admin provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account.
    User,
    /// Can publish official (flat-namespace) repositories.
    Admin,
    /// Can provision admin accounts.
    Superadmin,
}

impl UserRole {
    /// Parse from the wire spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            "superadmin" => Some(UserRole::Superadmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Superadmin => write!(f, "superadmin"),
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique email address.
    pub email: String,
    /// Unique username.
    pub username: String,
    /// Account role.
    pub role: UserRole,
    /// Argon2id hash of the password (PHC string).
    pub hashed_password: String,
    /// When true the account may only change its password; every other
    /// privileged operation is rejected until it does.
    pub must_change_password: bool,
    /// Unix timestamp of registration.
    pub joined_at: u64,
}

impl User {
    /// Create a new regular user.
    pub fn new(id: UserId, username: String, email: String, hashed_password: String) -> Self {
        Self {
            id,
            email,
            username,
            role: UserRole::User,
            hashed_password,
            must_change_password: false,
            joined_at: Self::now(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Require a password change before any other privileged action.
    pub fn with_password_change_required(mut self) -> Self {
        self.must_change_password = true;
        self
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Validate a username.
pub fn validate_username(username: &str) -> Result<(), String> {
    crate::validate_name(username)
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(format!("invalid email address: {}", email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_spelling() {
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Superadmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("owner"), None);
    }

    #[test]
    fn roles_are_not_ordered() {
        // Each check enumerates its roles; equality is the only comparison.
        assert_ne!(UserRole::Admin, UserRole::Superadmin);
        assert_ne!(UserRole::User, UserRole::Admin);
    }

    #[test]
    fn new_user_defaults() {
        let user = User::new(1, "alice".into(), "alice@example.com".into(), "$argon2$x".into());
        assert_eq!(user.role, UserRole::User);
        assert!(!user.must_change_password);
        assert!(user.joined_at > 0);
    }

    #[test]
    fn builder_flags() {
        let user = User::new(1, "admin".into(), "admin@example.com".into(), "h".into())
            .with_role(UserRole::Superadmin)
            .with_password_change_required();
        assert_eq!(user.role, UserRole::Superadmin);
        assert!(user.must_change_password);
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last@sub.domain.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }

    #[test]
    fn username_validation() {
        assert!(validate_username("u1").is_ok());
        assert!(validate_username("Username1").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("bad name").is_err());
    }
}
