//! Node configuration.
//!
//! Configuration is loaded once at startup and injected into the components
//! that need it; nothing reads the environment after boot.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NodeError, Result};

/// Environment override for the token signing secret.
pub const ENV_JWT_SECRET: &str = "WHARF_JWT_SECRET";
/// Environment override for the bootstrap superadmin password.
pub const ENV_SUPERADMIN_PASSWORD: &str = "WHARF_SUPERADMIN_PASSWORD";

/// Configuration for the Wharf node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Secret used to sign claim tokens. Must be set via the config file or
    /// the `WHARF_JWT_SECRET` environment variable.
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
    /// Email for the bootstrap superadmin account.
    pub superadmin_email: String,
    /// Initial superadmin password; the account is locked into a password
    /// change until it is rotated.
    pub superadmin_password: String,
    /// Directory for provisioning artifacts.
    pub data_dir: String,
    /// Directory for stored avatar images.
    pub image_dir: String,
    /// Log level.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 600,
            superadmin_email: "admin@wharf.local".to_string(),
            superadmin_password: "admin123".to_string(),
            data_dir: "./data".to_string(),
            image_dir: "./images".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&raw).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Apply environment-variable overrides for secrets.
    pub fn overlay_env(mut self) -> Self {
        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            self.jwt_secret = secret;
        }
        if let Ok(password) = std::env::var(ENV_SUPERADMIN_PASSWORD) {
            self.superadmin_password = password;
        }
        self
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            return Err(NodeError::Config(format!(
                "jwt_secret must be set (config file or {})",
                ENV_JWT_SECRET
            )));
        }
        if self.token_ttl_secs == 0 {
            return Err(NodeError::Config("token_ttl_secs must be non-zero".to_string()));
        }
        Ok(())
    }
}
