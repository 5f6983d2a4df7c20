//! User registration, login, and password management.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wharf_types::{validate_email, validate_username, User, UserId, UserRole};

use crate::error::{Entity, RegistryError, Result};
use crate::store::RegistryStore;

/// Input for registering an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
}

/// Account operations.
pub struct UserService {
    store: Arc<RegistryStore>,
}

impl UserService {
    /// Create the service.
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self { store }
    }

    /// Register a regular user.
    pub fn register(&self, new: NewUser) -> Result<User> {
        self.register_with_role(new, UserRole::User, false)
    }

    /// Register an administrator.
    ///
    /// The transport layer gates this behind a superadmin-only authorization
    /// check; the service itself only shapes the account.
    pub fn register_admin(&self, new: NewUser) -> Result<User> {
        self.register_with_role(new, UserRole::Admin, false)
    }

    /// Register the bootstrap superadmin.
    ///
    /// The account starts locked into a password change, so the provisioned
    /// initial password cannot be used for anything else.
    pub fn register_superadmin(&self, new: NewUser) -> Result<User> {
        self.register_with_role(new, UserRole::Superadmin, true)
    }

    fn register_with_role(
        &self,
        new: NewUser,
        role: UserRole,
        must_change_password: bool,
    ) -> Result<User> {
        validate_username(&new.username).map_err(RegistryError::InvalidInput)?;
        validate_email(&new.email).map_err(RegistryError::InvalidInput)?;

        let hashed = wharf_auth::password::hash_password(&new.password)?;
        let user = self.store.insert_user(
            new.username,
            new.email,
            hashed,
            role,
            must_change_password,
        )?;

        info!(user = %user.username, role = %user.role, "registered user");
        Ok(user)
    }

    /// Verify a username/password pair, returning the account on success.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller.
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .store
            .user_by_username(username)
            .ok_or(RegistryError::InvalidCredentials)?;

        if !wharf_auth::password::verify_password(password, &user.hashed_password)? {
            return Err(RegistryError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Change a user's password after verifying the current one.
    ///
    /// Clears `must_change_password`, releasing a locked account.
    pub fn change_password(&self, user_id: UserId, old: &str, new: &str) -> Result<User> {
        let user = self
            .store
            .user(user_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, user_id))?;

        if !wharf_auth::password::verify_password(old, &user.hashed_password)? {
            return Err(RegistryError::InvalidCredentials);
        }
        if new == old {
            return Err(RegistryError::InvalidInput(
                "new password must differ from the current password".to_string(),
            ));
        }

        let hashed = wharf_auth::password::hash_password(new)?;
        let user = self.store.update_password(user_id, hashed)?;

        info!(user = %user.username, "password changed");
        Ok(user)
    }

    /// Find a user by ID.
    pub fn find_by_id(&self, user_id: UserId) -> Result<User> {
        self.store
            .user(user_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, user_id))
    }

    /// Find a user by username.
    pub fn find_by_username(&self, username: &str) -> Result<User> {
        self.store
            .user_by_username(username)
            .ok_or_else(|| RegistryError::NotFound(Entity::User, username.to_string()))
    }

    /// Whether any superadmin account exists yet.
    pub fn superadmin_exists(&self) -> bool {
        self.store.first_with_role(UserRole::Superadmin).is_some()
    }
}
