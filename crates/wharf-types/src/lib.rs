//! Common entity types for the Wharf registry hub.
//!
//! This crate defines the data model shared by every other Wharf crate:
//! - **Users** with a closed role set (`user` / `admin` / `superadmin`)
//! - **Organizations** and their membership edges
//! - **Teams**, team membership, and team-to-repository permission grants
//! - **Repositories** with badges and globally-unique canonical names
//!
//! Types here are plain data: no storage, no locking, no I/O. Relationship
//! and uniqueness enforcement lives in `wharf-registry`.

mod org;
mod repo;
mod team;
mod user;

pub use org::{OrgId, OrgMember, Organization};
pub use repo::{Badge, RepoId, Repository};
pub use team::{PermissionKind, Team, TeamId, TeamMember, TeamPermission};
pub use user::{validate_email, validate_username, User, UserId, UserRole};

use once_cell::sync::Lazy;
use regex::Regex;

/// Names for organizations and usernames: start alphanumeric, then
/// alphanumeric, hyphens, and underscores.
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*$").expect("invalid name regex"));

/// Maximum length for usernames and organization names.
pub const MAX_NAME_LEN: usize = 39;

/// Validate a short identifier-like name (username, organization name).
///
/// Repository names are deliberately not run through this check: they are
/// free-form display names, and only their canonical names must be unique.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("name must be {} characters or less", MAX_NAME_LEN));
    }
    if !NAME_REGEX.is_match(name) {
        return Err(format!("invalid characters in name: {}", name));
    }
    Ok(())
}
