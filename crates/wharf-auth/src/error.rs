//! Error types for authentication and authorization.

use thiserror::Error;

/// Errors raised while authenticating or authorizing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No claims were supplied where they are required.
    #[error("authentication required")]
    Unauthenticated,

    /// The supplied token is malformed, mis-signed, or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The principal must change their password before doing anything else.
    #[error("password change required")]
    PasswordChangeRequired,

    /// The principal is authenticated but the role is not allowed.
    #[error("access denied for role {0}")]
    AccessDenied(String),

    /// A cryptographic primitive failed (hashing, encoding).
    #[error("crypto error: {0}")]
    Crypto(String),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
