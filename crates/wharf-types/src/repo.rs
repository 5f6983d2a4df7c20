//! Image repositories, badges, and canonical names.

use crate::org::OrgId;
use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a repository.
pub type RepoId = u64;

/// Repository classification, derived from the creator's privilege at
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// No badge.
    None,
    /// Created and maintained by an administrator; lives in the flat
    /// namespace.
    Official,
    /// Verified publisher.
    Verified,
    /// Sponsored open-source project.
    SponsoredOss,
}

impl Default for Badge {
    fn default() -> Self {
        Badge::None
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::None => write!(f, "none"),
            Badge::Official => write!(f, "official"),
            Badge::Verified => write!(f, "verified"),
            Badge::SponsoredOss => write!(f, "sponsored_oss"),
        }
    }
}

/// An image repository.
///
/// A repository is owned either personally (`organization_id` is `None`) or
/// by an organization. Its canonical name is computed once at creation and
/// never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique repository ID.
    pub id: RepoId,
    /// Display name.
    pub name: String,
    /// Globally unique canonical name; immutable once set.
    ///
    /// Official repositories use `{name}`; organization repositories use
    /// `{org}/{name}`; personal repositories use `{owner}/{name}`.
    pub canonical_name: String,
    /// Free-form description.
    pub desc: String,
    /// Public repositories are readable by anyone, including anonymous
    /// requesters.
    pub public: bool,
    /// The creating user.
    pub owner_id: UserId,
    /// Owning organization, if any.
    pub organization_id: Option<OrgId>,
    /// Classification badge.
    pub badge: Badge,
}

impl Repository {
    /// Whether this repository lives in the official flat namespace.
    pub fn is_official(&self) -> bool {
        self.badge == Badge::Official
    }

    /// Compute the canonical name for a repository.
    ///
    /// Official repositories claim the flat namespace; otherwise the name is
    /// prefixed with the organization name when present, or the owner's
    /// username. Deterministic and pure.
    pub fn canonical_name(
        name: &str,
        owner_username: &str,
        official: bool,
        org_name: Option<&str>,
    ) -> String {
        if official {
            name.to_string()
        } else {
            match org_name {
                Some(org) => format!("{}/{}", org, name),
                None => format!("{}/{}", owner_username, name),
            }
        }
    }
}
