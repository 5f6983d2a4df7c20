//! Organizations and organization membership.

use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// Unique identifier for an organization.
pub type OrgId = u64;

/// An organization: a shared namespace owning repositories and teams.
///
/// The owner is fixed at creation; there is no transfer operation. The owner
/// is always also a member (the membership edge is inserted in the same
/// transaction that creates the organization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization ID.
    pub id: OrgId,
    /// Globally unique name (flat namespace, no owner prefix).
    pub name: String,
    /// Free-form description.
    pub desc: String,
    /// File reference for the organization avatar.
    pub image: String,
    /// The creating user; immutable.
    pub owner_id: UserId,
}

impl Organization {
    /// Create a new organization.
    pub fn new(id: OrgId, name: String, desc: String, image: String, owner_id: UserId) -> Self {
        Self {
            id,
            name,
            desc,
            image,
            owner_id,
        }
    }
}

/// A membership edge between a user and an organization.
///
/// Membership is a set: the `(organization_id, user_id)` pair is unique and
/// inserts are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgMember {
    /// The organization.
    pub organization_id: OrgId,
    /// The member.
    pub user_id: UserId,
}

impl OrgMember {
    /// Create a membership edge.
    pub fn new(organization_id: OrgId, user_id: UserId) -> Self {
        Self {
            organization_id,
            user_id,
        }
    }
}
