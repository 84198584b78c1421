//! Aggregate builder
//!
//! Nests each live container under its owning node and owning service.
//! Containers whose desired state is `shutdown` are left out of the tree;
//! they stay visible in the flat view only. An owner id that does not
//! resolve skips that relation alone.

use super::{Container, Swarm};
use std::collections::HashMap;

/// Build the hierarchical view from a flat snapshot.
///
/// Pure: the same flat input always yields the same output.
pub fn build_aggregate(flat: &Swarm) -> Swarm {
    let node_index = index_by_id(flat.nodes.iter().map(|n| n.id.as_str()));
    let service_index = index_by_id(flat.services.iter().map(|s| s.id.as_str()));

    let mut node_containers: Vec<Vec<Container>> = vec![Vec::new(); flat.nodes.len()];
    let mut service_containers: Vec<Vec<Container>> = vec![Vec::new(); flat.services.len()];

    for container in flat.containers().iter().filter(|c| !c.is_shut_down()) {
        if let Some(&slot) = node_index.get(container.node_id.as_str()) {
            node_containers[slot].push(container.clone());
        }
        if let Some(&slot) = service_index.get(container.service_id.as_str()) {
            service_containers[slot].push(container.clone());
        }
    }

    let nodes = flat
        .nodes
        .iter()
        .zip(node_containers)
        .map(|(node, containers)| {
            let mut node = node.clone();
            node.containers = Some(containers);
            node
        })
        .collect();

    let services = flat
        .services
        .iter()
        .zip(service_containers)
        .map(|(service, containers)| {
            let mut service = service.clone();
            service.containers = Some(containers);
            service
        })
        .collect();

    Swarm {
        nodes,
        services,
        containers: None,
    }
}

/// Position of each id; the first entry wins on duplicates
fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        index.entry(id).or_insert(position);
    }
    index
}
