//! Error types for registry operations.

use thiserror::Error;
use wharf_types::{OrgId, RepoId};

/// The kind of entity referenced by an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A user account.
    User,
    /// An organization.
    Organization,
    /// A team.
    Team,
    /// A repository.
    Repository,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::User => write!(f, "user"),
            Entity::Organization => write!(f, "organization"),
            Entity::Team => write!(f, "team"),
            Entity::Repository => write!(f, "repository"),
        }
    }
}

/// Errors raised by registry operations.
///
/// All variants are request-scoped and terminal: the registry never retries
/// and never swallows them. The transport layer maps them one-to-one onto
/// client-visible failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The referenced entity does not exist.
    #[error("could not find {0} with identifier {1}")]
    NotFound(Entity, String),

    /// A uniqueness constraint was violated.
    #[error("{0} already taken")]
    FieldTaken(&'static str),

    /// The requester lacks the required relationship to the resource.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Both entities exist but lack the required relationship.
    #[error("organization {org_id} does not have a repository with identifier {repo_id}")]
    NotInRelationship {
        /// The organization claimed to own the repository.
        org_id: OrgId,
        /// The repository that belongs elsewhere.
        repo_id: RepoId,
    },

    /// Login or password-change credentials did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Malformed input rejected at the boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A cryptographic primitive failed.
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl RegistryError {
    /// Shorthand for a [`RegistryError::NotFound`] with a numeric id.
    pub fn not_found(entity: Entity, id: u64) -> Self {
        RegistryError::NotFound(entity, id.to_string())
    }
}

impl From<wharf_auth::AuthError> for RegistryError {
    fn from(err: wharf_auth::AuthError) -> Self {
        RegistryError::Crypto(err.to_string())
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            RegistryError::not_found(Entity::User, 7).to_string(),
            "could not find user with identifier 7"
        );
        assert_eq!(
            RegistryError::FieldTaken("email").to_string(),
            "email already taken"
        );
        assert_eq!(
            RegistryError::NotInRelationship { org_id: 1, repo_id: 9 }.to_string(),
            "organization 1 does not have a repository with identifier 9"
        );
    }
}
