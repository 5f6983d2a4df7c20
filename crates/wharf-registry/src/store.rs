//! Thread-safe identity store.
//!
//! The store is the only shared mutable state in the system. Every mutation
//! that depends on a uniqueness or relationship check performs the check and
//! the insert inside a single write-lock critical section, so concurrent
//! creation cannot slip past a pre-check: conflicts always surface as
//! [`RegistryError::FieldTaken`]. Lock acquisition follows the field order
//! of the struct to stay deadlock-free.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use wharf_types::{
    Badge, OrgId, OrgMember, Organization, PermissionKind, RepoId, Repository, Team, TeamId,
    TeamMember, TeamPermission, User, UserId, UserRole,
};

use crate::error::{Entity, RegistryError, Result};

/// In-memory, transactional store for users, organizations, teams, and
/// repositories.
#[derive(Debug, Default)]
pub struct RegistryStore {
    /// Next available ID for new entities.
    next_id: AtomicU64,

    /// Users by ID.
    users: RwLock<HashMap<UserId, User>>,
    /// Username to ID mapping (unique index).
    username_index: RwLock<HashMap<String, UserId>>,
    /// Email to ID mapping (unique index).
    email_index: RwLock<HashMap<String, UserId>>,

    /// Organizations by ID.
    orgs: RwLock<HashMap<OrgId, Organization>>,
    /// Organization name to ID mapping (unique index, flat namespace).
    org_name_index: RwLock<HashMap<String, OrgId>>,
    /// Organization membership edges.
    org_members: RwLock<HashSet<(OrgId, UserId)>>,

    /// Teams by ID.
    teams: RwLock<HashMap<TeamId, Team>>,
    /// Team membership edges.
    team_members: RwLock<HashSet<(TeamId, UserId)>>,
    /// Team permission grants by (team, repo) pair.
    team_permissions: RwLock<HashMap<(TeamId, RepoId), TeamPermission>>,

    /// Repositories by ID.
    repos: RwLock<HashMap<RepoId, Repository>>,
    /// Canonical name to ID mapping (unique index).
    canonical_index: RwLock<HashMap<String, RepoId>>,
}

impl RegistryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    // ==================== Users ====================

    /// Insert a new user, enforcing email and username uniqueness.
    ///
    /// The email check runs before the username check, so a record clashing
    /// on both reports the email first.
    pub fn insert_user(
        &self,
        username: String,
        email: String,
        hashed_password: String,
        role: UserRole,
        must_change_password: bool,
    ) -> Result<User> {
        let mut users = self.users.write();
        let mut by_username = self.username_index.write();
        let mut by_email = self.email_index.write();

        if by_email.contains_key(&email) {
            return Err(RegistryError::FieldTaken("email"));
        }
        if by_username.contains_key(&username) {
            return Err(RegistryError::FieldTaken("username"));
        }

        let id = self.next_id();
        let mut user = User::new(id, username.clone(), email.clone(), hashed_password)
            .with_role(role);
        user.must_change_password = must_change_password;

        users.insert(id, user.clone());
        by_username.insert(username, id);
        by_email.insert(email, id);

        Ok(user)
    }

    /// Get a user by ID.
    pub fn user(&self, id: UserId) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    /// Get a user by username.
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        let id = *self.username_index.read().get(username)?;
        self.user(id)
    }

    /// Get a user by email.
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let id = *self.email_index.read().get(email)?;
        self.user(id)
    }

    /// Find any user holding the given role.
    pub fn first_with_role(&self, role: UserRole) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|u| u.role == role)
            .cloned()
    }

    /// Replace a user's password hash and clear the pending-change flag.
    pub fn update_password(&self, id: UserId, hashed_password: String) -> Result<User> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, id))?;

        user.hashed_password = hashed_password;
        user.must_change_password = false;

        Ok(user.clone())
    }

    // ==================== Organizations ====================

    /// Create an organization and its owner's membership edge atomically.
    ///
    /// A reader can never observe the organization without its owner as
    /// member: both writes happen under the same critical section.
    pub fn insert_org(
        &self,
        name: String,
        desc: String,
        image: String,
        owner_id: UserId,
    ) -> Result<Organization> {
        let mut orgs = self.orgs.write();
        let mut by_name = self.org_name_index.write();
        let mut members = self.org_members.write();

        if by_name.contains_key(&name) {
            return Err(RegistryError::FieldTaken("organization name"));
        }

        let id = self.next_id();
        let org = Organization::new(id, name.clone(), desc, image, owner_id);

        orgs.insert(id, org.clone());
        by_name.insert(name, id);
        members.insert((id, owner_id));

        Ok(org)
    }

    /// Get an organization by ID.
    pub fn org(&self, id: OrgId) -> Option<Organization> {
        self.orgs.read().get(&id).cloned()
    }

    /// Get an organization by name.
    pub fn org_by_name(&self, name: &str) -> Option<Organization> {
        let id = *self.org_name_index.read().get(name)?;
        self.org(id)
    }

    /// Insert a membership edge; returns the edge whether or not it already
    /// existed.
    pub fn insert_org_member(&self, org_id: OrgId, user_id: UserId) -> OrgMember {
        self.org_members.write().insert((org_id, user_id));
        OrgMember::new(org_id, user_id)
    }

    /// Whether the user is a member of the organization.
    pub fn is_org_member(&self, org_id: OrgId, user_id: UserId) -> bool {
        self.org_members.read().contains(&(org_id, user_id))
    }

    /// List organizations a user belongs to.
    pub fn orgs_of_user(&self, user_id: UserId) -> Vec<Organization> {
        let members = self.org_members.read();
        let orgs = self.orgs.read();
        members
            .iter()
            .filter(|(_, uid)| *uid == user_id)
            .filter_map(|(oid, _)| orgs.get(oid).cloned())
            .collect()
    }

    /// Count members of an organization.
    pub fn org_member_count(&self, org_id: OrgId) -> usize {
        self.org_members
            .read()
            .iter()
            .filter(|(oid, _)| *oid == org_id)
            .count()
    }

    // ==================== Teams ====================

    /// Insert a new team.
    pub fn insert_team(&self, organization_id: OrgId, name: String, desc: String) -> Team {
        let id = self.next_id();
        let team = Team::new(id, organization_id, name, desc);
        self.teams.write().insert(id, team.clone());
        team
    }

    /// Get a team by ID.
    pub fn team(&self, id: TeamId) -> Option<Team> {
        self.teams.read().get(&id).cloned()
    }

    /// List teams of an organization.
    pub fn teams_of_org(&self, org_id: OrgId) -> Vec<Team> {
        self.teams
            .read()
            .values()
            .filter(|t| t.organization_id == org_id)
            .cloned()
            .collect()
    }

    /// Find an existing team membership edge.
    pub fn find_team_member(&self, team_id: TeamId, user_id: UserId) -> Option<TeamMember> {
        self.team_members
            .read()
            .contains(&(team_id, user_id))
            .then(|| TeamMember::new(team_id, user_id))
    }

    /// Insert a team membership edge; idempotent.
    pub fn insert_team_member(&self, team_id: TeamId, user_id: UserId) -> TeamMember {
        self.team_members.write().insert((team_id, user_id));
        TeamMember::new(team_id, user_id)
    }

    /// Find an existing permission grant.
    pub fn find_team_permission(&self, team_id: TeamId, repo_id: RepoId) -> Option<TeamPermission> {
        self.team_permissions
            .read()
            .get(&(team_id, repo_id))
            .copied()
    }

    /// Insert a permission grant; an existing grant is returned unchanged
    /// (edges are insert-only, never mutated).
    pub fn insert_team_permission(
        &self,
        team_id: TeamId,
        repo_id: RepoId,
        kind: PermissionKind,
    ) -> TeamPermission {
        *self
            .team_permissions
            .write()
            .entry((team_id, repo_id))
            .or_insert_with(|| TeamPermission::new(team_id, repo_id, kind))
    }

    /// The strongest permission any of the user's teams grants on a
    /// repository.
    pub fn strongest_team_grant(&self, user_id: UserId, repo_id: RepoId) -> Option<PermissionKind> {
        let members = self.team_members.read();
        self.team_permissions
            .read()
            .values()
            .filter(|p| p.repo_id == repo_id && members.contains(&(p.team_id, user_id)))
            .map(|p| p.kind)
            .max()
    }

    // ==================== Repositories ====================

    /// Insert a repository, reserving its canonical name.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_repo(
        &self,
        name: String,
        canonical_name: String,
        desc: String,
        public: bool,
        owner_id: UserId,
        organization_id: Option<OrgId>,
        badge: Badge,
    ) -> Result<Repository> {
        let mut repos = self.repos.write();
        let mut by_canonical = self.canonical_index.write();

        if by_canonical.contains_key(&canonical_name) {
            return Err(RegistryError::FieldTaken("repository name"));
        }

        let id = self.next_id();
        let repo = Repository {
            id,
            name,
            canonical_name: canonical_name.clone(),
            desc,
            public,
            owner_id,
            organization_id,
            badge,
        };

        repos.insert(id, repo.clone());
        by_canonical.insert(canonical_name, id);

        Ok(repo)
    }

    /// Get a repository by ID.
    pub fn repo(&self, id: RepoId) -> Option<Repository> {
        self.repos.read().get(&id).cloned()
    }

    /// Get a repository by canonical name.
    pub fn repo_by_canonical_name(&self, canonical_name: &str) -> Option<Repository> {
        let id = *self.canonical_index.read().get(canonical_name)?;
        self.repo(id)
    }

    /// List repositories a user owns personally (outside any organization).
    pub fn personal_repos_of(&self, user_id: UserId) -> Vec<Repository> {
        self.repos
            .read()
            .values()
            .filter(|r| r.owner_id == user_id && r.organization_id.is_none())
            .cloned()
            .collect()
    }

    /// List repositories owned by an organization.
    pub fn repos_of_org(&self, org_id: OrgId) -> Vec<Repository> {
        self.repos
            .read()
            .values()
            .filter(|r| r.organization_id == Some(org_id))
            .cloned()
            .collect()
    }
}
