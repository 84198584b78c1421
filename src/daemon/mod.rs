//! swarm-info daemon
//!
//! HTTP surface over the published swarm state: JSON snapshots, proxied
//! log streams and the dashboard assets.

mod api;
mod server;

pub use api::{ApiHandler, RouteInfo, API_ROUTES};
pub use server::SwarmInfoDaemon;
