//! Teams, team membership, and team permission grants.

use crate::org::OrgId;
use crate::repo::RepoId;
use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a team.
pub type TeamId = u64;

/// Permission level granted to a team on a repository.
///
/// Kinds are ordered: `Read < ReadWrite < Admin`. Grants are recorded on the
/// graph but do not currently narrow read visibility; see
/// `wharf-registry`'s `effective_permission`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    /// Pull images.
    Read,
    /// Pull and push images.
    ReadWrite,
    /// Full control of the repository.
    Admin,
}

impl PermissionKind {
    /// Whether this kind grants at least the required kind.
    pub fn grants(&self, required: PermissionKind) -> bool {
        *self >= required
    }

    /// Parse from the wire spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(PermissionKind::Read),
            "read_write" => Some(PermissionKind::ReadWrite),
            "admin" => Some(PermissionKind::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionKind::Read => write!(f, "read"),
            PermissionKind::ReadWrite => write!(f, "read_write"),
            PermissionKind::Admin => write!(f, "admin"),
        }
    }
}

impl Default for PermissionKind {
    fn default() -> Self {
        PermissionKind::Read
    }
}

/// A team within an organization.
///
/// Teams exist only inside their organization and are created only by the
/// organization owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team ID.
    pub id: TeamId,
    /// Owning organization.
    pub organization_id: OrgId,
    /// Team name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
}

impl Team {
    /// Create a new team.
    pub fn new(id: TeamId, organization_id: OrgId, name: String, desc: String) -> Self {
        Self {
            id,
            organization_id,
            name,
            desc,
        }
    }
}

/// A membership edge between a user and a team.
///
/// The user must already be a member of the team's organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMember {
    /// The team.
    pub team_id: TeamId,
    /// The member.
    pub user_id: UserId,
}

impl TeamMember {
    /// Create a membership edge.
    pub fn new(team_id: TeamId, user_id: UserId) -> Self {
        Self { team_id, user_id }
    }
}

/// A permission grant from a team to a repository.
///
/// The repository must belong to the team's organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamPermission {
    /// The team.
    pub team_id: TeamId,
    /// The repository.
    pub repo_id: RepoId,
    /// Granted permission level.
    pub kind: PermissionKind,
}

impl TeamPermission {
    /// Create a permission grant.
    pub fn new(team_id: TeamId, repo_id: RepoId, kind: PermissionKind) -> Self {
        Self {
            team_id,
            repo_id,
            kind,
        }
    }
}
