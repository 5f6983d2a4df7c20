//! Organization creation and membership management.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wharf_types::{validate_name, OrgId, OrgMember, Organization, UserId};

use crate::error::{Entity, RegistryError, Result};
use crate::store::RegistryStore;

/// Input for creating an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    /// Globally unique name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
    /// Avatar file reference; callers without one pass `None` and the
    /// boundary supplies a generated default.
    pub image: Option<String>,
}

/// Organization operations.
pub struct OrgService {
    store: Arc<RegistryStore>,
}

impl OrgService {
    /// Create the service.
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self { store }
    }

    /// Create an organization owned by `owner_id`.
    ///
    /// The owner becomes a member in the same transaction; there is no
    /// window in which the organization exists with zero members.
    pub fn create(&self, owner_id: UserId, new: NewOrganization) -> Result<Organization> {
        validate_name(&new.name).map_err(RegistryError::InvalidInput)?;

        self.store
            .user(owner_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, owner_id))?;

        let org = self.store.insert_org(
            new.name,
            new.desc,
            new.image.unwrap_or_default(),
            owner_id,
        )?;

        info!(org = %org.name, owner_id, "created organization");
        Ok(org)
    }

    /// Add a user to an organization; idempotent on an existing edge.
    pub fn add_member(&self, org_id: OrgId, user_id: UserId) -> Result<OrgMember> {
        self.store
            .org(org_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Organization, org_id))?;
        self.store
            .user(user_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, user_id))?;

        Ok(self.store.insert_org_member(org_id, user_id))
    }

    /// Get an organization by ID.
    pub fn get(&self, org_id: OrgId) -> Result<Organization> {
        self.store
            .org(org_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Organization, org_id))
    }

    /// Whether a user is a member of an organization.
    pub fn is_member(&self, org_id: OrgId, user_id: UserId) -> bool {
        self.store.is_org_member(org_id, user_id)
    }

    /// List the organizations a user belongs to.
    pub fn orgs_of(&self, user_id: UserId) -> Vec<Organization> {
        self.store.orgs_of_user(user_id)
    }
}
