//! Team creation, membership, and permission grants.
//!
//! Every mutation here is gated on the organization owner, and the check
//! order is part of the contract: idempotence first, then existence, then
//! relationship, then ownership.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wharf_types::{
    Organization, PermissionKind, RepoId, Team, TeamId, TeamMember, TeamPermission, UserId,
};

use crate::error::{Entity, RegistryError, Result};
use crate::store::RegistryStore;

/// Input for creating a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeam {
    /// Owning organization.
    pub organization_id: u64,
    /// Team name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
}

/// Team operations.
pub struct TeamService {
    store: Arc<RegistryStore>,
}

impl TeamService {
    /// Create the service.
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self { store }
    }

    /// Create a team; only the organization owner may do this.
    pub fn create(&self, new: NewTeam, requester_id: UserId) -> Result<Team> {
        let org = self
            .store
            .org(new.organization_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Organization, new.organization_id))?;
        ensure_owner(&org, requester_id)?;

        let team = self.store.insert_team(org.id, new.name, new.desc);
        info!(team = %team.name, org = %org.name, "created team");
        Ok(team)
    }

    /// Get a team by ID.
    pub fn get(&self, team_id: TeamId) -> Result<Team> {
        self.store
            .team(team_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Team, team_id))
    }

    /// Add a user to a team; idempotent on an existing edge.
    ///
    /// The user must already be a member of the team's organization; a
    /// missing membership is reported as the user not being found within the
    /// organization. Only the organization owner may mutate the team.
    pub fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
        requester_id: UserId,
    ) -> Result<TeamMember> {
        if let Some(existing) = self.store.find_team_member(team_id, user_id) {
            return Ok(existing);
        }

        self.store
            .user(user_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, user_id))?;
        let team = self.get(team_id)?;
        if !self.store.is_org_member(team.organization_id, user_id) {
            return Err(RegistryError::not_found(Entity::User, user_id));
        }
        let org = self
            .store
            .org(team.organization_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Organization, team.organization_id))?;
        ensure_owner(&org, requester_id)?;

        Ok(self.store.insert_team_member(team_id, user_id))
    }

    /// Grant a team a permission on a repository; idempotent on an existing
    /// grant.
    ///
    /// The repository must belong to the team's organization; only the
    /// organization owner may grant.
    pub fn add_permission(
        &self,
        team_id: TeamId,
        repo_id: RepoId,
        kind: PermissionKind,
        requester_id: UserId,
    ) -> Result<TeamPermission> {
        if let Some(existing) = self.store.find_team_permission(team_id, repo_id) {
            return Ok(existing);
        }

        let repo = self
            .store
            .repo(repo_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Repository, repo_id))?;
        let team = self.get(team_id)?;
        if repo.organization_id != Some(team.organization_id) {
            return Err(RegistryError::NotInRelationship {
                org_id: team.organization_id,
                repo_id: repo.id,
            });
        }
        let org = self
            .store
            .org(team.organization_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Organization, team.organization_id))?;
        ensure_owner(&org, requester_id)?;

        Ok(self.store.insert_team_permission(team_id, repo_id, kind))
    }

    /// List the teams of an organization.
    ///
    /// The requester must be a member of the organization.
    pub fn teams_of_org(&self, org_id: u64, requester_id: UserId) -> Result<Vec<Team>> {
        self.store
            .org(org_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Organization, org_id))?;
        if !self.store.is_org_member(org_id, requester_id) {
            return Err(RegistryError::not_found(Entity::User, requester_id));
        }
        Ok(self.store.teams_of_org(org_id))
    }
}

fn ensure_owner(org: &Organization, user_id: UserId) -> Result<()> {
    if org.owner_id != user_id {
        return Err(RegistryError::AccessDenied(format!(
            "you are not the owner of organization {}",
            org.name
        )));
    }
    Ok(())
}
