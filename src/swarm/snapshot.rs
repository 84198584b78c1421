//! Snapshot builder
//!
//! Maps raw listings one-to-one into the flat view. No filtering, no
//! cross-referencing and no reordering happens here.

use super::{Container, Node, Service, Swarm};
use crate::error::Result;
use crate::gateway::{Gateway, NodeRecord, ServiceRecord, TaskRecord};

/// Raw listings fetched from the gateway in one refresh cycle
#[derive(Debug, Clone, Default)]
pub struct Listings {
    pub nodes: Vec<NodeRecord>,
    pub tasks: Vec<TaskRecord>,
    pub services: Vec<ServiceRecord>,
}

impl Listings {
    /// Fetch nodes, tasks and services; the first failure aborts the fetch
    pub async fn fetch(gateway: &dyn Gateway) -> Result<Self> {
        let nodes = gateway.list_nodes().await?;
        let tasks = gateway.list_tasks().await?;
        let services = gateway.list_services().await?;

        Ok(Self {
            nodes,
            tasks,
            services,
        })
    }
}

/// Build the flat view from one set of listings
pub fn build_snapshot(listings: &Listings) -> Swarm {
    Swarm {
        nodes: listings.nodes.iter().map(Node::from_record).collect(),
        services: listings.services.iter().map(Service::from_record).collect(),
        containers: Some(listings.tasks.iter().map(Container::from_task).collect()),
    }
}
