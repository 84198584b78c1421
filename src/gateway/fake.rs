//! In-memory gateway for tests

use super::records::{
    ContainerSpec, ContainerStatus, ManagerStatus, NetworkAttachmentConfig, NodeDescription,
    NodeRecord, NodeStatus, ReplicatedMode, ServiceMode, ServiceRecord, ServiceSpec, TaskRecord,
    TaskSpec, TaskStatus,
};
use super::{Gateway, LogStream};
use crate::error::{Result, SwarmInfoError};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// One of the three control-plane listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Nodes,
    Tasks,
    Services,
}

/// Scripted gateway with per-listing failure switches
#[derive(Default)]
pub struct FakeGateway {
    nodes: Mutex<Vec<NodeRecord>>,
    tasks: Mutex<Vec<TaskRecord>>,
    services: Mutex<Vec<ServiceRecord>>,
    logs: Mutex<HashMap<String, Vec<&'static str>>>,
    fail_nodes: AtomicBool,
    fail_tasks: AtomicBool,
    fail_services: AtomicBool,
    stall_nodes: AtomicBool,
    listing_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new(nodes: Vec<NodeRecord>, tasks: Vec<TaskRecord>, services: Vec<ServiceRecord>) -> Self {
        Self {
            nodes: Mutex::new(nodes),
            tasks: Mutex::new(tasks),
            services: Mutex::new(services),
            ..Default::default()
        }
    }

    /// Make one listing fail until reset
    pub fn set_failing(&self, listing: Listing, failing: bool) {
        let switch = match listing {
            Listing::Nodes => &self.fail_nodes,
            Listing::Tasks => &self.fail_tasks,
            Listing::Services => &self.fail_services,
        };
        switch.store(failing, Ordering::SeqCst);
    }

    /// Make the node listing hang until reset
    pub fn set_stalled(&self, stalled: bool) {
        self.stall_nodes.store(stalled, Ordering::SeqCst);
    }

    pub fn set_tasks(&self, tasks: Vec<TaskRecord>) {
        *self.tasks.lock().unwrap() = tasks;
    }

    pub fn add_logs(&self, id: &str, chunks: Vec<&'static str>) {
        self.logs.lock().unwrap().insert(id.to_string(), chunks);
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    fn stream(&self, id: &str) -> Result<LogStream> {
        let chunks = self
            .logs
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| SwarmInfoError::NotFound(id.to_string()))?;

        Ok(futures_util::stream::iter(
            chunks.into_iter().map(|c| Ok(Bytes::from_static(c.as_bytes()))),
        )
        .boxed())
    }

    fn check(&self, switch: &AtomicBool) -> Result<()> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if switch.load(Ordering::SeqCst) {
            return Err(SwarmInfoError::Gateway("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_nodes(&self) -> Result<Vec<NodeRecord>> {
        self.check(&self.fail_nodes)?;
        if self.stall_nodes.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(self.nodes.lock().unwrap().clone())
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        self.check(&self.fail_tasks)?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>> {
        self.check(&self.fail_services)?;
        Ok(self.services.lock().unwrap().clone())
    }

    async fn container_logs(&self, id: &str) -> Result<LogStream> {
        self.stream(id)
    }

    async fn service_logs(&self, id: &str) -> Result<LogStream> {
        self.stream(id)
    }
}

/// Worker node record
pub fn node(id: &str, hostname: &str) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        description: NodeDescription {
            hostname: hostname.to_string(),
        },
        status: NodeStatus {
            state: "ready".to_string(),
            addr: "10.0.0.2".to_string(),
        },
        manager_status: None,
        created_at: None,
    }
}

/// Leader manager node record
pub fn manager(id: &str, hostname: &str) -> NodeRecord {
    NodeRecord {
        manager_status: Some(ManagerStatus {
            leader: true,
        }),
        ..node(id, hostname)
    }
}

/// Replicated service record
pub fn service(id: &str, name: &str, replicas: Option<u64>) -> ServiceRecord {
    ServiceRecord {
        id: id.to_string(),
        spec: ServiceSpec {
            name: name.to_string(),
            mode: ServiceMode {
                replicated: replicas.map(|r| ReplicatedMode { replicas: Some(r) }),
            },
        },
        created_at: None,
    }
}

/// Running task record with a started container `c-<id>`
pub fn task(id: &str, service_id: &str, node_id: &str, desired_state: &str) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        service_id: service_id.to_string(),
        node_id: node_id.to_string(),
        slot: Some(1),
        spec: TaskSpec {
            container_spec: Some(ContainerSpec {
                image: "nginx@sha256:abcd".to_string(),
            }),
            networks: vec![NetworkAttachmentConfig {
                aliases: vec!["web".to_string()],
            }],
        },
        status: TaskStatus {
            state: "running".to_string(),
            err: None,
            container_status: Some(ContainerStatus {
                container_id: format!("c-{}", id),
            }),
        },
        desired_state: desired_state.to_string(),
        created_at: None,
    }
}
