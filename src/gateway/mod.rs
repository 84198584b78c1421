//! Control-plane gateway
//!
//! The refresh loop and the log endpoints only ever talk to the cluster
//! through the [`Gateway`] trait. [`DockerGateway`] speaks the Docker Engine
//! HTTP API over TCP, [`UnixSocketGateway`] over the Engine's local socket.

mod docker;
#[cfg(test)]
pub(crate) mod fake;
pub mod records;
#[cfg(unix)]
mod unix;

pub use docker::DockerGateway;
pub use records::{NodeRecord, ServiceRecord, TaskRecord};
#[cfg(unix)]
pub use unix::UnixSocketGateway;

use crate::config::{Config, GatewayEndpoint};
use crate::error::{Result, SwarmInfoError};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::Deserialize;
use std::sync::Arc;

/// Live log byte stream proxied from the gateway
pub type LogStream = BoxStream<'static, Result<Bytes>>;

/// Read-only access to the orchestrator's control plane
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Check that the control plane answers
    async fn ping(&self) -> Result<()>;

    /// List swarm nodes in gateway order
    async fn list_nodes(&self) -> Result<Vec<NodeRecord>>;

    /// List swarm tasks in gateway order, whatever their state
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>>;

    /// List swarm services in gateway order
    async fn list_services(&self) -> Result<Vec<ServiceRecord>>;

    /// Open the stdout/stderr log stream of a container
    async fn container_logs(&self, id: &str) -> Result<LogStream>;

    /// Open the aggregated log stream of a service
    async fn service_logs(&self, id: &str) -> Result<LogStream>;
}

/// Build the gateway for the configured endpoint
pub fn connect(config: &Config) -> Result<Arc<dyn Gateway>> {
    match config.endpoint()? {
        GatewayEndpoint::Http(base_url) => Ok(Arc::new(DockerGateway::new(
            &base_url,
            config.request_timeout,
        )?)),
        #[cfg(unix)]
        GatewayEndpoint::Unix(socket_path) => Ok(Arc::new(UnixSocketGateway::new(
            socket_path,
            config.request_timeout,
        ))),
        #[cfg(not(unix))]
        GatewayEndpoint::Unix(socket_path) => Err(SwarmInfoError::InvalidConfig(format!(
            "unix socket {} is not available on this platform",
            socket_path.display()
        ))),
    }
}

/// Error body returned by the Engine API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Build an error from a non-success status and its body
pub(crate) fn status_error(status: u16, body: &[u8]) -> SwarmInfoError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());

    SwarmInfoError::GatewayStatus { status, message }
}

/// Object ids and names are restricted to `[A-Za-z0-9_.-]`
pub(crate) fn is_valid_object_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_validation() {
        assert!(is_valid_object_id("e5d62702a1b4"));
        assert!(is_valid_object_id("web.1.x7f"));
        assert!(!is_valid_object_id(""));
        assert!(!is_valid_object_id("../info"));
        assert!(!is_valid_object_id("abc?tail=1"));
    }

    #[test]
    fn test_status_error_reads_engine_message() {
        let err = status_error(503, br#"{"message":"This node is not a swarm manager."}"#);
        match err {
            SwarmInfoError::GatewayStatus { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "This node is not a swarm manager.");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = status_error(500, b"boom");
        assert!(matches!(err, SwarmInfoError::GatewayStatus { message, .. } if message == "boom"));
    }

    #[test]
    fn test_connect_picks_transport() {
        let config = Config {
            gateway_url: "tcp://10.0.0.5:2375".to_string(),
            ..Default::default()
        };
        assert!(connect(&config).is_ok());

        #[cfg(unix)]
        assert!(connect(&Config::default()).is_ok());

        let config = Config {
            gateway_url: "npipe:////./pipe/docker_engine".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            connect(&config),
            Err(SwarmInfoError::InvalidConfig(_))
        ));
    }
}
