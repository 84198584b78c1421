//! HTTP API for swarm-info
//!
//! Serves the latest published generation and proxies log streams from
//! the gateway. Anything outside `/api/` is a dashboard asset.

use crate::error::SwarmInfoError;
use crate::gateway::{Gateway, LogStream};
use crate::swarm::SwarmState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde::Serialize;
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::compression::{Compression, CompressionLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Content type of proxied log streams
const LOG_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Registered API route
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteInfo {
    pub path: &'static str,
    pub method: &'static str,
}

/// Routes advertised by `GET /api/`
pub const API_ROUTES: &[RouteInfo] = &[
    RouteInfo { path: "/api/node/", method: "GET" },
    RouteInfo { path: "/api/container/", method: "GET" },
    RouteInfo { path: "/api/container/{id}/logs/", method: "GET" },
    RouteInfo { path: "/api/service/", method: "GET" },
    RouteInfo { path: "/api/service/{id}/logs/", method: "GET" },
    RouteInfo { path: "/api/aggregate/", method: "GET" },
    RouteInfo { path: "/api/status/", method: "GET" },
];

/// API handler state shared by all requests
#[derive(Clone)]
pub struct ApiHandler {
    state: Arc<SwarmState>,
    gateway: Arc<dyn Gateway>,
}

impl ApiHandler {
    /// Create a new API handler
    pub fn new(state: Arc<SwarmState>, gateway: Arc<dyn Gateway>) -> Self {
        Self { state, gateway }
    }

    /// Build the HTTP router, serving assets from `static_dir`
    pub fn router(self, static_dir: &FsPath) -> Router {
        let snapshots = Router::new()
            .route("/api/", get(list_routes))
            .route("/api/node/", get(list_nodes))
            .route("/api/container/", get(list_containers))
            .route("/api/service/", get(list_services))
            .route("/api/aggregate/", get(aggregate))
            .route("/api/status/", get(status))
            .layer(CompressionLayer::new());

        // Log streams stay uncompressed so chunks reach the client as they arrive
        let logs = Router::new()
            .route("/api/container/{id}/logs/", get(container_logs))
            .route("/api/service/{id}/logs/", get(service_logs))
            .route("/api/{*rest}", any(api_not_found));

        // Vendored client libraries 404 when missing instead of getting index.html
        let vendor = ServeDir::new(static_dir.join("node_modules"));
        let assets = ServeDir::new(static_dir)
            .fallback(ServeFile::new(static_dir.join("index.html")));

        Router::new()
            .merge(snapshots)
            .merge(logs)
            .nest_service("/node_modules", Compression::new(vendor))
            .fallback_service(Compression::new(assets))
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }
}

async fn list_routes() -> Json<&'static [RouteInfo]> {
    Json(API_ROUTES)
}

async fn list_nodes(State(api): State<ApiHandler>) -> Response {
    let snapshot = api.state.flat_snapshot();
    Json(&snapshot.nodes).into_response()
}

async fn list_containers(State(api): State<ApiHandler>) -> Response {
    let snapshot = api.state.flat_snapshot();
    Json(snapshot.containers()).into_response()
}

async fn list_services(State(api): State<ApiHandler>) -> Response {
    let snapshot = api.state.flat_snapshot();
    Json(&snapshot.services).into_response()
}

async fn aggregate(State(api): State<ApiHandler>) -> Response {
    let view = api.state.aggregate_view();
    Json(&*view).into_response()
}

async fn status(State(api): State<ApiHandler>) -> Response {
    Json(api.state.current().info()).into_response()
}

async fn container_logs(State(api): State<ApiHandler>, Path(id): Path<String>) -> Response {
    match api.gateway.container_logs(&id).await {
        Ok(stream) => log_response(stream),
        Err(e) => e.into_response(),
    }
}

async fn service_logs(State(api): State<ApiHandler>, Path(id): Path<String>) -> Response {
    match api.gateway.service_logs(&id).await {
        Ok(stream) => log_response(stream),
        Err(e) => e.into_response(),
    }
}

async fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Stream gateway log bytes; dropping the body closes the gateway stream
fn log_response(stream: LogStream) -> Response {
    (
        [(header::CONTENT_TYPE, LOG_CONTENT_TYPE)],
        Body::from_stream(stream),
    )
        .into_response()
}

impl IntoResponse for SwarmInfoError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return (StatusCode::NOT_FOUND, "Not Found").into_response();
        }

        warn!("Gateway request failed: {}", self);
        (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
    }
}
