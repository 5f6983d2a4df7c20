//! Process bootstrap for the Wharf registry hub.
//!
//! The node binary composes the registry core: it loads configuration,
//! initializes logging, builds the store, services, and authorization gate,
//! and provisions the bootstrap superadmin. The HTTP transport mounts on
//! top of these pieces and is out of scope here.

pub mod avatar;
pub mod config;
mod error;
pub mod seed;

pub use config::Config;
pub use error::{NodeError, Result};
