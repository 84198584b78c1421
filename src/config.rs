//! Runtime configuration

use crate::error::{Result, SwarmInfoError};
use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 80;

/// Default Docker Engine endpoint, the local daemon socket
pub const DEFAULT_GATEWAY_URL: &str = "unix:///var/run/docker.sock";

/// Where the Docker Engine API is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEndpoint {
    /// HTTP(S) base URL
    Http(String),
    /// Path of the Engine's Unix socket
    Unix(PathBuf),
}

/// swarm-info configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Docker Engine API address in `DOCKER_HOST` form
    pub gateway_url: String,
    /// Pause between refresh cycles
    pub refresh_interval: Duration,
    /// Upper bound for a single listing request
    pub request_timeout: Duration,
    /// Directory holding the dashboard assets
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            refresh_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(10),
            static_dir: PathBuf::from("client"),
        }
    }
}

impl Config {
    /// Check the configuration
    pub fn validate(self) -> Result<Self> {
        self.endpoint()?;

        if self.refresh_interval.is_zero() {
            return Err(SwarmInfoError::InvalidConfig(
                "refresh interval must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(SwarmInfoError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(self)
    }

    /// Resolve the gateway address
    pub fn endpoint(&self) -> Result<GatewayEndpoint> {
        parse_gateway_url(&self.gateway_url)
    }
}

/// Turn a `DOCKER_HOST` style address into an endpoint
fn parse_gateway_url(raw: &str) -> Result<GatewayEndpoint> {
    let raw = raw.trim();

    if let Some(path) = raw.strip_prefix("unix://") {
        if path.is_empty() {
            return Err(SwarmInfoError::InvalidConfig(
                "unix gateway URL has no socket path".to_string(),
            ));
        }
        return Ok(GatewayEndpoint::Unix(PathBuf::from(path)));
    }

    let raw = raw.trim_end_matches('/');

    if raw.is_empty() {
        return Err(SwarmInfoError::InvalidConfig(
            "gateway URL is empty".to_string(),
        ));
    }

    if raw.starts_with("npipe://") {
        return Err(SwarmInfoError::InvalidConfig(format!(
            "{} is a Windows named pipe, which is not supported",
            raw
        )));
    }

    if let Some(rest) = raw.strip_prefix("tcp://") {
        return Ok(GatewayEndpoint::Http(format!("http://{}", rest)));
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Ok(GatewayEndpoint::Http(raw.to_string()));
    }

    Ok(GatewayEndpoint::Http(format!("http://{}", raw)))
}
