//! Swarm containers
//!
//! A container is the observable side of a swarm task. Every listed task
//! becomes one container, whatever its state.

use crate::error::{Result, SwarmInfoError};
use crate::gateway::TaskRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Desired state of tasks that have been replaced or scaled away
pub const DESIRED_STATE_SHUTDOWN: &str = "shutdown";

/// Separator between repository and content digest in task images
const DIGEST_SEPARATOR: char = '@';

/// A single task instance of a service on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container ID (empty until the container has started)
    pub id: String,
    /// Display name, `<alias>.<slot>`
    pub name: String,
    /// Image repository
    pub image: String,
    /// Image content digest
    pub image_hash: String,
    /// Last task error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Observed task state
    pub state: String,
    /// Owning service ID
    pub service_id: String,
    /// Replica slot
    pub slot: Option<u64>,
    /// Owning node ID
    pub node_id: String,
    /// Desired task state
    pub desired_state: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Container {
    /// Map a task listing record
    pub fn from_task(task: &TaskRecord) -> Self {
        let raw_image = task
            .spec
            .container_spec
            .as_ref()
            .map(|spec| spec.image.as_str())
            .unwrap_or_default();

        let (image, image_hash) = match split_image(raw_image) {
            Ok((image, digest)) => (image.to_string(), digest.to_string()),
            Err(e) => {
                warn!("Task {}: {}", task.id, e);
                (raw_image.to_string(), String::new())
            }
        };

        Self {
            id: task
                .status
                .container_status
                .as_ref()
                .map(|cs| cs.container_id.clone())
                .unwrap_or_default(),
            name: display_name(task),
            image,
            image_hash,
            error: task.status.err.clone().filter(|e| !e.is_empty()),
            state: task.status.state.clone(),
            service_id: task.service_id.clone(),
            slot: task.slot,
            node_id: task.node_id.clone(),
            desired_state: task.desired_state.clone(),
            created_at: task.created_at.unwrap_or_default(),
        }
    }

    /// Check if the orchestrator wants this container gone
    pub fn is_shut_down(&self) -> bool {
        self.desired_state == DESIRED_STATE_SHUTDOWN
    }
}

/// Split `repository@digest` into its two halves
pub fn split_image(image: &str) -> Result<(&str, &str)> {
    image
        .split_once(DIGEST_SEPARATOR)
        .ok_or_else(|| SwarmInfoError::MalformedImage(format!("{:?} has no digest", image)))
}

/// First alias of the first attached network, suffixed with the slot.
///
/// Empty when the task has no network alias. Tasks of global services carry
/// no slot, so their name is the bare alias (`web`, not `web.0`) and the
/// container's `slot` serializes as `null`.
fn display_name(task: &TaskRecord) -> String {
    let alias = task
        .spec
        .networks
        .first()
        .and_then(|network| network.aliases.first());

    match (alias, task.slot) {
        (Some(alias), Some(slot)) => format!("{}.{}", alias, slot),
        (Some(alias), None) => alias.clone(),
        (None, _) => String::new(),
    }
}
