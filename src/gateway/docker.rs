//! Docker Engine API gateway over TCP

use super::records::{NodeRecord, ServiceRecord, TaskRecord};
use super::{is_valid_object_id, status_error, Gateway, LogStream};
use crate::error::{Result, SwarmInfoError};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Gateway backed by the Docker Engine HTTP API
pub struct DockerGateway {
    /// Engine API base URL
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
    /// Upper bound for listing requests
    request_timeout: Duration,
}

impl DockerGateway {
    /// Create a new gateway client
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(request_timeout)
            .user_agent(concat!("swarm-info/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SwarmInfoError::Gateway(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            request_timeout,
        })
    }

    /// Fetch a JSON array listing
    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("Listing {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Open a log stream; no timeout since it lives as long as the reader
    async fn logs(&self, kind: &str, id: &str) -> Result<LogStream> {
        if !is_valid_object_id(id) {
            return Err(SwarmInfoError::NotFound(id.to_string()));
        }

        let url = format!("{}/{}/{}/logs", self.base_url, kind, id);

        let response = self
            .client
            .get(&url)
            .query(&[("stdout", "1"), ("stderr", "1")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SwarmInfoError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(SwarmInfoError::from))
            .boxed())
    }
}

#[async_trait]
impl Gateway for DockerGateway {
    async fn ping(&self) -> Result<()> {
        let url = format!("{}/_ping", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        Ok(())
    }

    async fn list_nodes(&self) -> Result<Vec<NodeRecord>> {
        self.list("nodes").await
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        self.list("tasks").await
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>> {
        self.list("services").await
    }

    async fn container_logs(&self, id: &str) -> Result<LogStream> {
        self.logs("containers", id).await
    }

    async fn service_logs(&self, id: &str) -> Result<LogStream> {
        self.logs("services", id).await
    }
}

async fn error_from(response: reqwest::Response) -> SwarmInfoError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    status_error(status, &body)
}
