//! Control-plane listing records
//!
//! These mirror the subset of the Docker Engine swarm objects that the
//! snapshot builder consumes. Every section is optional on the wire, so
//! missing data deserializes to defaults instead of failing the listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Swarm node as listed by `GET /nodes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeRecord {
    /// Node ID
    #[serde(rename = "ID")]
    pub id: String,
    /// Node description
    pub description: NodeDescription,
    /// Node status
    pub status: NodeStatus,
    /// Manager status (managers only)
    pub manager_status: Option<ManagerStatus>,
    /// Created timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Node description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeDescription {
    /// Hostname
    pub hostname: String,
}

/// Node status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeStatus {
    /// State
    pub state: String,
    /// Address
    pub addr: String,
}

/// Manager status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ManagerStatus {
    /// Is leader
    pub leader: bool,
}

/// Swarm task as listed by `GET /tasks`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskRecord {
    /// Task ID
    #[serde(rename = "ID")]
    pub id: String,
    /// Service ID
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    /// Node ID (empty until scheduled)
    #[serde(rename = "NodeID")]
    pub node_id: String,
    /// Slot (replicated services only)
    pub slot: Option<u64>,
    /// Task spec
    pub spec: TaskSpec,
    /// Task status
    pub status: TaskStatus,
    /// Desired state
    pub desired_state: String,
    /// Created timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Task spec
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskSpec {
    /// Container spec
    pub container_spec: Option<ContainerSpec>,
    /// Networks
    pub networks: Vec<NetworkAttachmentConfig>,
}

/// Container spec
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerSpec {
    /// Image in `repository@digest` form
    pub image: String,
}

/// Network attachment config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkAttachmentConfig {
    /// Aliases on the target network
    pub aliases: Vec<String>,
}

/// Task status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskStatus {
    /// State
    pub state: String,
    /// Error
    pub err: Option<String>,
    /// Container status (absent until the container exists)
    pub container_status: Option<ContainerStatus>,
}

/// Container status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerStatus {
    /// Container ID
    #[serde(rename = "ContainerID")]
    pub container_id: String,
}

/// Swarm service as listed by `GET /services`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceRecord {
    /// Service ID
    #[serde(rename = "ID")]
    pub id: String,
    /// Service spec
    pub spec: ServiceSpec,
    /// Created timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Service spec
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceSpec {
    /// Service name
    pub name: String,
    /// Service mode
    pub mode: ServiceMode,
}

/// Service mode; only the replicated variant carries a replica count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceMode {
    /// Replicated mode
    pub replicated: Option<ReplicatedMode>,
}

/// Replicated service mode
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReplicatedMode {
    /// Desired replicas
    pub replicas: Option<u64>,
}
