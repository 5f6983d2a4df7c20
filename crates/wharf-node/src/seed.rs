//! First-boot provisioning.
//!
//! A fresh deployment has no accounts, so nothing could ever pass the
//! superadmin gate that admin registration requires. Seeding creates the
//! bootstrap superadmin with the configured initial password, locked into a
//! password change, and writes that password to a provisioning file so the
//! operator can complete the first login.

use std::fs;
use std::path::Path;
use tracing::info;
use wharf_registry::{NewUser, UserService};
use wharf_types::User;

use crate::avatar;
use crate::config::Config;
use crate::error::Result;

/// Username of the bootstrap superadmin.
pub const SUPERADMIN_USERNAME: &str = "admin";
/// File in the data directory receiving the initial password.
pub const PASSWORD_FILE: &str = "superadmin_password.txt";

/// Create the bootstrap superadmin if none exists yet.
///
/// Idempotent: returns `Ok(None)` when a superadmin is already present.
pub fn ensure_superadmin(users: &UserService, config: &Config) -> Result<Option<User>> {
    if users.superadmin_exists() {
        info!("superadmin already exists");
        return Ok(None);
    }

    let user = users.register_superadmin(NewUser {
        username: SUPERADMIN_USERNAME.to_string(),
        email: config.superadmin_email.clone(),
        password: config.superadmin_password.clone(),
    })?;

    fs::create_dir_all(&config.data_dir)?;
    let password_path = Path::new(&config.data_dir).join(PASSWORD_FILE);
    fs::write(&password_path, &config.superadmin_password)?;
    info!(path = %password_path.display(), "wrote initial superadmin password");

    let identicon = avatar::generate_identicon(
        SUPERADMIN_USERNAME,
        avatar::DEFAULT_SIZE,
        avatar::DEFAULT_BLOCK,
    );
    let image_path = avatar::save_image(
        &identicon,
        SUPERADMIN_USERNAME,
        Path::new(&config.image_dir),
    )?;
    info!(path = %image_path.display(), "generated default superadmin avatar");

    info!(user = %user.username, "superadmin added");
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wharf_registry::RegistryStore;
    use wharf_types::UserRole;

    fn test_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.jwt_secret = "seed-test-secret".to_string();
        config.data_dir = root.join("data").display().to_string();
        config.image_dir = root.join("images").display().to_string();
        config
    }

    #[test]
    fn seeds_locked_superadmin_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let users = UserService::new(Arc::new(RegistryStore::new()));

        let seeded = ensure_superadmin(&users, &config).unwrap().unwrap();
        assert_eq!(seeded.username, SUPERADMIN_USERNAME);
        assert_eq!(seeded.role, UserRole::Superadmin);
        assert!(seeded.must_change_password);

        let password_file = dir.path().join("data").join(PASSWORD_FILE);
        assert_eq!(
            fs::read_to_string(password_file).unwrap(),
            config.superadmin_password
        );
        assert!(dir.path().join("images").join("admin.svg").exists());

        // The provisioned password logs in.
        assert!(users
            .login(SUPERADMIN_USERNAME, &config.superadmin_password)
            .is_ok());
    }

    #[test]
    fn seeding_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let users = UserService::new(Arc::new(RegistryStore::new()));

        assert!(ensure_superadmin(&users, &config).unwrap().is_some());
        assert!(ensure_superadmin(&users, &config).unwrap().is_none());
    }
}
