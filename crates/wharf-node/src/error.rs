//! Error types for node bootstrap.

use thiserror::Error;

/// Errors raised while bootstrapping the node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Filesystem failure while provisioning.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is missing, unreadable, or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// An inline image could not be decoded.
    #[error("invalid image data: {0}")]
    InvalidImage(String),

    /// A registry operation failed during seeding.
    #[error(transparent)]
    Registry(#[from] wharf_registry::RegistryError),
}

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
