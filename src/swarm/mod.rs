//! Swarm state aggregation
//!
//! This module turns the control plane's node, task and service listings
//! into a flat snapshot and a hierarchical aggregate view, and keeps the
//! latest pair published for readers.

pub mod aggregate;
pub mod container;
pub mod node;
pub mod refresh;
pub mod service;
pub mod snapshot;
pub mod state;

pub use aggregate::build_aggregate;
pub use container::{split_image, Container, DESIRED_STATE_SHUTDOWN};
pub use node::Node;
pub use refresh::Refresher;
pub use service::Service;
pub use snapshot::{build_snapshot, Listings};
pub use state::{Generation, SwarmState};

use serde::{Deserialize, Serialize};

/// A cluster snapshot
///
/// In the flat view `containers` holds every listed container and the nodes
/// and services carry no nested lists. In the aggregate view `containers` is
/// `None` and the containers live inside their node and service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    /// Nodes in listing order
    pub nodes: Vec<Node>,
    /// Services in listing order
    pub services: Vec<Service>,
    /// Containers in listing order (flat view only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
}

impl Swarm {
    /// Get a node by ID
    pub fn get_node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a service by ID
    pub fn get_service_by_id(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Get a container by ID
    pub fn get_container_by_id(&self, id: &str) -> Option<&Container> {
        self.containers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|c| c.id == id)
    }

    /// Flat containers, empty for an aggregate view
    pub fn containers(&self) -> &[Container] {
        self.containers.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fake;

    fn sample() -> Swarm {
        build_snapshot(&Listings {
            nodes: vec![fake::node("n1", "alpha"), fake::node("n2", "beta")],
            tasks: vec![fake::task("t1", "s1", "n1", "running")],
            services: vec![fake::service("s1", "web", Some(1))],
        })
    }

    #[test]
    fn test_lookup_by_id() {
        let swarm = sample();
        assert_eq!(swarm.get_node_by_id("n2").unwrap().hostname, "beta");
        assert_eq!(swarm.get_service_by_id("s1").unwrap().name, "web");
        assert_eq!(swarm.get_container_by_id("c-t1").unwrap().node_id, "n1");
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let swarm = sample();
        assert!(swarm.get_node_by_id("n").is_none());
        assert!(swarm.get_node_by_id("N1").is_none());
        assert!(swarm.get_service_by_id("").is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let swarm = Swarm::default();
        assert!(swarm.nodes.is_empty());
        assert!(swarm.containers().is_empty());
        assert!(swarm.get_container_by_id("x").is_none());
    }
}
