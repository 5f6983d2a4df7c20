//! Authentication and authorization for Wharf.
//!
//! This crate provides:
//! - **Passwords**: Argon2id hashing with constant-time verification
//! - **Claims**: HS256-signed claim sets carrying `{id, role,
//!   must_change_password}` plus expiry
//! - **Gating**: [`AuthGate`], a pure evaluator that turns an optional
//!   bearer token plus a role allow-list into a typed [`Principal`] or a
//!   typed refusal
//!
//! # Example
//!
//! ```
//! use wharf_auth::{AuthGate, TokenCodec};
//! use wharf_types::{User, UserRole};
//!
//! let gate = AuthGate::new(TokenCodec::new(b"secret", 600));
//!
//! let admin = User::new(1, "a1".into(), "a1@example.com".into(), "hash".into())
//!     .with_role(UserRole::Admin);
//! let token = gate.codec().issue(&admin).unwrap();
//!
//! let principal = gate
//!     .authorize(Some(token.as_str()), Some(&[UserRole::User, UserRole::Admin]), false)
//!     .unwrap();
//! assert_eq!(principal.id, 1);
//! ```

mod claims;
mod error;
mod guard;
pub mod password;

pub use claims::{Claims, TokenCodec};
pub use error::{AuthError, Result};
pub use guard::{AuthGate, Principal};
