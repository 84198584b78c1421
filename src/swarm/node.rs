//! Swarm nodes

use super::container::Container;
use crate::gateway::NodeRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Swarm node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node ID
    pub id: String,
    /// Node hostname
    pub hostname: String,
    /// Node state
    pub state: String,
    /// Participates in the manager quorum
    pub manager: bool,
    /// Current raft leader
    pub leader: bool,
    /// Node address
    pub ip: String,
    /// Containers on this node; only set in the aggregate view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    /// Joined timestamp
    pub joined_at: DateTime<Utc>,
}

impl Node {
    /// Map a node listing record
    pub fn from_record(record: &NodeRecord) -> Self {
        Self {
            id: record.id.clone(),
            hostname: record.description.hostname.clone(),
            state: record.status.state.clone(),
            manager: record.manager_status.is_some(),
            leader: record
                .manager_status
                .as_ref()
                .map(|s| s.leader)
                .unwrap_or(false),
            ip: record.status.addr.clone(),
            containers: None,
            joined_at: record.created_at.unwrap_or_default(),
        }
    }
}
