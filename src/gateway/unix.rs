//! Docker Engine API gateway over the local Unix socket

use super::records::{NodeRecord, ServiceRecord, TaskRecord};
use super::{is_valid_object_id, status_error, Gateway, LogStream};
use crate::error::{Result, SwarmInfoError};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use http_body_util::{BodyExt, Empty};
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper::header::{HOST, USER_AGENT};
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::UnixStream;
use tracing::debug;

/// Gateway speaking HTTP/1 to the Engine through its Unix socket
pub struct UnixSocketGateway {
    /// Path of the Engine socket
    socket_path: PathBuf,
    /// Upper bound for listing requests
    request_timeout: Duration,
}

impl UnixSocketGateway {
    /// Create a gateway for the socket at `socket_path`
    pub fn new(socket_path: impl Into<PathBuf>, request_timeout: Duration) -> Self {
        Self {
            socket_path: socket_path.into(),
            request_timeout,
        }
    }

    /// Send a GET over a fresh connection
    async fn get(&self, path_and_query: &str) -> Result<Response<Incoming>> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            SwarmInfoError::Gateway(format!("{}: {}", self.socket_path.display(), e))
        })?;

        let (mut sender, conn) = http1::handshake(TokioIo::new(stream))
            .await
            .map_err(transport_error)?;

        // Drives the connection until the response body is consumed
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!("Engine socket connection closed: {}", e);
            }
        });

        let request = Request::builder()
            .uri(path_and_query)
            .header(HOST, "docker")
            .header(USER_AGENT, concat!("swarm-info/", env!("CARGO_PKG_VERSION")))
            .body(Empty::<Bytes>::new())
            .map_err(|e| SwarmInfoError::Gateway(e.to_string()))?;

        sender.send_request(request).await.map_err(transport_error)
    }

    /// GET a path and collect the whole successful body
    async fn get_bytes(&self, path_and_query: &str) -> Result<Bytes> {
        let response = self.get(path_and_query).await?;
        let status = response.status();

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(transport_error)?
            .to_bytes();

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        Ok(body)
    }

    /// Bound a request by the listing timeout
    async fn bounded<T>(&self, what: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.request_timeout, fut)
            .await
            .map_err(|_| {
                SwarmInfoError::Timeout(format!(
                    "{} not answered within {:?}",
                    what, self.request_timeout
                ))
            })?
    }

    /// Fetch a JSON array listing
    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let path = format!("/{}", resource);
        debug!("Listing {} on {}", path, self.socket_path.display());

        let body = self.bounded(&path, self.get_bytes(&path)).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Open a log stream; no timeout since it lives as long as the reader
    async fn logs(&self, kind: &str, id: &str) -> Result<LogStream> {
        if !is_valid_object_id(id) {
            return Err(SwarmInfoError::NotFound(id.to_string()));
        }

        let response = self
            .get(&format!("/{}/{}/logs?stdout=1&stderr=1", kind, id))
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SwarmInfoError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response
                .into_body()
                .collect()
                .await
                .map(|collected| collected.to_bytes())
                .unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        Ok(response
            .into_body()
            .into_data_stream()
            .map(|chunk| chunk.map_err(transport_error))
            .boxed())
    }
}

#[async_trait]
impl Gateway for UnixSocketGateway {
    async fn ping(&self) -> Result<()> {
        self.bounded("/_ping", self.get_bytes("/_ping")).await?;
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

fn transport_error(err: hyper::Error) -> SwarmInfoError {
    SwarmInfoError::Gateway(err.to_string())
}
