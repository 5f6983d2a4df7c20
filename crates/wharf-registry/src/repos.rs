//! Repository creation and read visibility.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wharf_types::{Badge, OrgId, PermissionKind, RepoId, Repository, UserId, UserRole};

use crate::error::{Entity, RegistryError, Result};
use crate::naming;
use crate::store::RegistryStore;

/// Input for creating a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRepository {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
    /// Whether the repository is publicly readable.
    pub public: bool,
    /// Owning organization, if creating under one.
    pub organization_id: Option<OrgId>,
}

/// Repository operations and the visibility resolver.
pub struct RepoService {
    store: Arc<RegistryStore>,
}

impl RepoService {
    /// Create the service.
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self { store }
    }

    /// Create a repository for `owner_id`.
    ///
    /// Creating under an organization requires membership. The canonical
    /// name is resolved once here and reserved by the store; a collision is
    /// `FieldTaken`. Administrators publish official (flat-namespace,
    /// badged) repositories.
    pub fn create(&self, owner_id: UserId, new: NewRepository) -> Result<Repository> {
        let owner = self
            .store
            .user(owner_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, owner_id))?;

        let org = match new.organization_id {
            Some(org_id) => {
                let org = self
                    .store
                    .org(org_id)
                    .ok_or_else(|| RegistryError::not_found(Entity::Organization, org_id))?;
                if !self.store.is_org_member(org_id, owner_id) {
                    return Err(RegistryError::AccessDenied(format!(
                        "{} is not a member of organization {}",
                        owner.username, org.name
                    )));
                }
                Some(org)
            }
            None => None,
        };

        let canonical = naming::canonical_name_for(&owner, org.as_ref(), &new.name);
        let badge = if owner.role == UserRole::Admin {
            Badge::Official
        } else {
            Badge::None
        };

        let repo = self.store.insert_repo(
            new.name,
            canonical,
            new.desc,
            new.public,
            owner_id,
            org.map(|o| o.id),
            badge,
        )?;

        info!(repo = %repo.canonical_name, public = repo.public, "created repository");
        Ok(repo)
    }

    /// Get a repository by ID.
    pub fn get(&self, repo_id: RepoId) -> Result<Repository> {
        self.store
            .repo(repo_id)
            .ok_or_else(|| RegistryError::not_found(Entity::Repository, repo_id))
    }

    /// Get a repository by canonical name.
    pub fn find_by_canonical_name(&self, canonical_name: &str) -> Result<Repository> {
        self.store
            .repo_by_canonical_name(canonical_name)
            .ok_or_else(|| {
                RegistryError::NotFound(Entity::Repository, canonical_name.to_string())
            })
    }

    /// Whether `requester` may read `repo`.
    ///
    /// Public repositories are readable by anyone, including anonymous
    /// requesters. Private personal repositories are readable only by their
    /// owner. Private organization repositories are readable by any member
    /// of the owning organization; team grants are deliberately not
    /// consulted here (see [`RepoService::effective_permission`]).
    pub fn can_read(&self, repo: &Repository, requester: Option<UserId>) -> bool {
        if repo.public {
            return true;
        }
        let Some(user_id) = requester else {
            return false;
        };
        match repo.organization_id {
            None => repo.owner_id == user_id,
            Some(org_id) => self.store.is_org_member(org_id, user_id),
        }
    }

    /// List the repositories of `owner_user_id` that `requester` may read:
    /// their personal repositories plus those of every organization they
    /// belong to, filtered through [`RepoService::can_read`]. The result is
    /// a set; iteration order is unspecified.
    pub fn list_visible(
        &self,
        owner_user_id: UserId,
        requester: Option<UserId>,
    ) -> Result<Vec<Repository>> {
        self.store
            .user(owner_user_id)
            .ok_or_else(|| RegistryError::not_found(Entity::User, owner_user_id))?;

        let mut repos = self.store.personal_repos_of(owner_user_id);
        for org in self.store.orgs_of_user(owner_user_id) {
            repos.extend(self.store.repos_of_org(org.id));
        }

        Ok(repos
            .into_iter()
            .filter(|r| self.can_read(r, requester))
            .collect())
    }

    /// The strongest permission a user holds on a repository, or `None`.
    ///
    /// Resolution order: the owner holds `Admin`; membership of the owning
    /// organization grants a `Read` baseline; team grants can raise the
    /// level further. This is the extension point for narrowing reads to
    /// team scope; `can_read` does not consult it today.
    pub fn effective_permission(
        &self,
        user_id: UserId,
        repo_id: RepoId,
    ) -> Result<Option<PermissionKind>> {
        let repo = self.get(repo_id)?;

        if repo.owner_id == user_id {
            return Ok(Some(PermissionKind::Admin));
        }

        let mut best = None;
        if let Some(org_id) = repo.organization_id {
            if self.store.is_org_member(org_id, user_id) {
                best = Some(PermissionKind::Read);
            }
        }
        if let Some(kind) = self.store.strongest_team_grant(user_id, repo_id) {
            if best.map_or(true, |b| kind > b) {
                best = Some(kind);
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orgs::{NewOrganization, OrgService};
    use crate::teams::{NewTeam, TeamService};
    use crate::users::{NewUser, UserService};

    struct Fixture {
        users: UserService,
        orgs: OrgService,
        teams: TeamService,
        repos: RepoService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(RegistryStore::new());
        Fixture {
            users: UserService::new(Arc::clone(&store)),
            orgs: OrgService::new(Arc::clone(&store)),
            teams: TeamService::new(Arc::clone(&store)),
            repos: RepoService::new(store),
        }
    }

    fn register(f: &Fixture, name: &str) -> UserId {
        f.users
            .register(NewUser {
                username: name.to_string(),
                email: format!("{}@example.com", name),
                password: "Password1234".to_string(),
            })
            .unwrap()
            .id
    }

    fn register_admin(f: &Fixture, name: &str) -> UserId {
        f.users
            .register_admin(NewUser {
                username: name.to_string(),
                email: format!("{}@example.com", name),
                password: "Password1234".to_string(),
            })
            .unwrap()
            .id
    }

    fn create_org(f: &Fixture, owner: UserId, name: &str) -> OrgId {
        f.orgs
            .create(
                owner,
                NewOrganization {
                    name: name.to_string(),
                    desc: String::new(),
                    image: None,
                },
            )
            .unwrap()
            .id
    }

    fn new_repo(name: &str, public: bool, org: Option<OrgId>) -> NewRepository {
        NewRepository {
            name: name.to_string(),
            desc: String::new(),
            public,
            organization_id: org,
        }
    }

    #[test]
    fn admin_and_user_share_a_name_without_conflict() {
        // The flat official namespace and the per-user namespace coexist.
        let f = fixture();
        let a1 = register_admin(&f, "a1");
        let u1 = register(&f, "u1");

        let official = f.repos.create(a1, new_repo("python", true, None)).unwrap();
        assert_eq!(official.canonical_name, "python");
        assert_eq!(official.badge, Badge::Official);
        assert!(official.is_official());

        let personal = f.repos.create(u1, new_repo("python", true, None)).unwrap();
        assert_eq!(personal.canonical_name, "u1/python");
        assert_eq!(personal.badge, Badge::None);
    }

    #[test]
    fn canonical_collision_is_field_taken() {
        let f = fixture();
        let u1 = register(&f, "u1");

        f.repos.create(u1, new_repo("python", true, None)).unwrap();
        assert_eq!(
            f.repos.create(u1, new_repo("python", false, None)),
            Err(RegistryError::FieldTaken("repository name"))
        );

        // Two admins collide in the flat namespace.
        let a1 = register_admin(&f, "a1");
        let a2 = register_admin(&f, "a2");
        f.repos.create(a1, new_repo("node", true, None)).unwrap();
        assert_eq!(
            f.repos.create(a2, new_repo("node", true, None)),
            Err(RegistryError::FieldTaken("repository name"))
        );
    }

    #[test]
    fn org_repo_requires_membership() {
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let org = create_org(&f, u1, "org1");

        assert!(matches!(
            f.repos.create(u2, new_repo("api", true, Some(org))),
            Err(RegistryError::AccessDenied(_))
        ));
        assert_eq!(
            f.repos.create(u2, new_repo("api", true, Some(999))),
            Err(RegistryError::not_found(Entity::Organization, 999))
        );

        let repo = f.repos.create(u1, new_repo("api", true, Some(org))).unwrap();
        assert_eq!(repo.canonical_name, "org1/api");
        assert_eq!(repo.organization_id, Some(org));
    }

    #[test]
    fn create_requires_existing_owner() {
        let f = fixture();
        assert_eq!(
            f.repos.create(999, new_repo("x", true, None)),
            Err(RegistryError::not_found(Entity::User, 999))
        );
    }

    #[test]
    fn public_repo_is_readable_by_anyone() {
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let repo = f.repos.create(u1, new_repo("pub", true, None)).unwrap();

        assert!(f.repos.can_read(&repo, None));
        assert!(f.repos.can_read(&repo, Some(u1)));
        assert!(f.repos.can_read(&repo, Some(u2)));
    }

    #[test]
    fn private_personal_repo_is_owner_only() {
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let repo = f.repos.create(u1, new_repo("secret", false, None)).unwrap();

        assert!(!f.repos.can_read(&repo, None));
        assert!(f.repos.can_read(&repo, Some(u1)));
        assert!(!f.repos.can_read(&repo, Some(u2)));
    }

    #[test]
    fn private_org_repo_opens_after_joining() {
        // The scenario: private repo in org1; u2 cannot read it until u2
        // joins org1.
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let org = create_org(&f, u1, "org1");
        let repo = f
            .repos
            .create(u1, new_repo("python", false, Some(org)))
            .unwrap();

        assert!(!f.repos.can_read(&repo, Some(u2)));
        assert!(!f.repos.can_read(&repo, None));

        f.orgs.add_member(org, u2).unwrap();
        assert!(f.repos.can_read(&repo, Some(u2)));
    }

    #[test]
    fn team_grants_do_not_narrow_org_reads() {
        // Any org member reads any private org repo, team-scoped or not.
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let org = create_org(&f, u1, "org1");
        f.orgs.add_member(org, u2).unwrap();

        let repo = f
            .repos
            .create(u1, new_repo("scoped", false, Some(org)))
            .unwrap();
        let team = f
            .teams
            .create(
                NewTeam {
                    organization_id: org,
                    name: "core".to_string(),
                    desc: String::new(),
                },
                u1,
            )
            .unwrap();
        f.teams
            .add_permission(team.id, repo.id, PermissionKind::Read, u1)
            .unwrap();

        // u2 is in no team, yet still reads via org membership.
        assert!(f.repos.can_read(&repo, Some(u2)));
    }

    #[test]
    fn list_visible_filters_by_requester() {
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let org = create_org(&f, u1, "org1");

        f.repos.create(u1, new_repo("pub", true, None)).unwrap();
        f.repos.create(u1, new_repo("priv", false, None)).unwrap();
        f.repos
            .create(u1, new_repo("org-priv", false, Some(org)))
            .unwrap();

        let all: Vec<String> = f
            .repos
            .list_visible(u1, Some(u1))
            .unwrap()
            .into_iter()
            .map(|r| r.canonical_name)
            .collect();
        assert_eq!(all.len(), 3);

        let anon: Vec<String> = f
            .repos
            .list_visible(u1, None)
            .unwrap()
            .into_iter()
            .map(|r| r.canonical_name)
            .collect();
        assert_eq!(anon, vec!["u1/pub".to_string()]);

        let stranger = f.repos.list_visible(u1, Some(u2)).unwrap();
        assert_eq!(stranger.len(), 1);

        f.orgs.add_member(org, u2).unwrap();
        let member = f.repos.list_visible(u1, Some(u2)).unwrap();
        assert_eq!(member.len(), 2);

        assert_eq!(
            f.repos.list_visible(999, None),
            Err(RegistryError::not_found(Entity::User, 999))
        );
    }

    #[test]
    fn effective_permission_resolution() {
        let f = fixture();
        let u1 = register(&f, "u1");
        let u2 = register(&f, "u2");
        let u3 = register(&f, "u3");
        let org = create_org(&f, u1, "org1");
        f.orgs.add_member(org, u2).unwrap();

        let repo = f
            .repos
            .create(u1, new_repo("api", false, Some(org)))
            .unwrap();

        // Owner: admin. Plain org member: read baseline. Outsider: none.
        assert_eq!(
            f.repos.effective_permission(u1, repo.id).unwrap(),
            Some(PermissionKind::Admin)
        );
        assert_eq!(
            f.repos.effective_permission(u2, repo.id).unwrap(),
            Some(PermissionKind::Read)
        );
        assert_eq!(f.repos.effective_permission(u3, repo.id).unwrap(), None);

        // A team grant raises the member's level.
        let team = f
            .teams
            .create(
                NewTeam {
                    organization_id: org,
                    name: "writers".to_string(),
                    desc: String::new(),
                },
                u1,
            )
            .unwrap();
        f.teams.add_member(team.id, u2, u1).unwrap();
        f.teams
            .add_permission(team.id, repo.id, PermissionKind::ReadWrite, u1)
            .unwrap();

        assert_eq!(
            f.repos.effective_permission(u2, repo.id).unwrap(),
            Some(PermissionKind::ReadWrite)
        );
    }
}
