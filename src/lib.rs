//! swarm-info - Docker Swarm introspection service
//!
//! swarm-info polls a swarm manager's control plane and republishes the
//! cluster as a consistent in-memory snapshot. It provides:
//!
//! - A flat view of nodes, containers and services
//! - An aggregate view with containers nested under their node and service
//! - Live container and service log streams proxied from the Engine API
//! - A small HTTP API and dashboard over all of the above

pub mod config;
pub mod daemon;
pub mod error;
pub mod gateway;
pub mod swarm;

pub use config::Config;
pub use error::{Result, SwarmInfoError};
