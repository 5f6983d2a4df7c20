//! Canonical-name resolution for new repositories.
//!
//! The canonical name is the repository's globally-unique identity. It is
//! derived once at creation and never recomputed; reservation happens inside
//! the store's insert, so resolution here stays pure.

use wharf_types::{Organization, Repository, User, UserRole};

/// Resolve the canonical name a new repository will claim.
///
/// Administrators publish into the flat official namespace; everyone else is
/// prefixed with the organization name (when creating under an organization)
/// or their own username.
pub fn canonical_name_for(owner: &User, org: Option<&Organization>, name: &str) -> String {
    let official = owner.role == UserRole::Admin;
    Repository::canonical_name(name, &owner.username, official, org.map(|o| o.name.as_str()))
}
