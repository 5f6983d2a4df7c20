//! Identity store and access-control graph for Wharf.
//!
//! This crate provides:
//! - **Store**: [`RegistryStore`], the thread-safe identity store with
//!   uniqueness enforced inside its transactions
//! - **Users**: registration, login, and password management
//! - **Organizations**: atomic creation with owner self-membership,
//!   idempotent membership edges
//! - **Teams**: owner-gated team creation, membership, and repository
//!   permission grants
//! - **Repositories**: canonical-name derivation and the read-visibility
//!   resolver
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wharf_registry::{
//!     NewOrganization, NewRepository, NewUser, OrgService, RegistryStore, RepoService,
//!     UserService,
//! };
//!
//! let store = Arc::new(RegistryStore::new());
//! let users = UserService::new(Arc::clone(&store));
//! let orgs = OrgService::new(Arc::clone(&store));
//! let repos = RepoService::new(Arc::clone(&store));
//!
//! let alice = users
//!     .register(NewUser {
//!         username: "alice".into(),
//!         email: "alice@example.com".into(),
//!         password: "Password1234".into(),
//!     })
//!     .unwrap();
//!
//! let org = orgs
//!     .create(
//!         alice.id,
//!         NewOrganization {
//!             name: "acme".into(),
//!             desc: "".into(),
//!             image: None,
//!         },
//!     )
//!     .unwrap();
//! assert!(orgs.is_member(org.id, alice.id));
//!
//! let repo = repos
//!     .create(
//!         alice.id,
//!         NewRepository {
//!             name: "api".into(),
//!             desc: "".into(),
//!             public: false,
//!             organization_id: Some(org.id),
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(repo.canonical_name, "acme/api");
//! assert!(repos.can_read(&repo, Some(alice.id)));
//! assert!(!repos.can_read(&repo, None));
//! ```

mod error;
pub mod naming;
mod orgs;
mod repos;
mod store;
mod teams;
mod users;

pub use error::{Entity, RegistryError, Result};
pub use orgs::{NewOrganization, OrgService};
pub use repos::{NewRepository, RepoService};
pub use store::RegistryStore;
pub use teams::{NewTeam, TeamService};
pub use users::{NewUser, UserService};
