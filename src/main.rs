//! swarm-info - Docker Swarm introspection service
//!
//! This is the main entry point for swarm-info.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use swarm_info::config::{Config, DEFAULT_GATEWAY_URL, DEFAULT_PORT};
use swarm_info::daemon::SwarmInfoDaemon;
use swarm_info::gateway;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// swarm-info - Docker Swarm dashboard and JSON API
#[derive(Parser)]
#[command(name = "swarm-info")]
#[command(author = "Evoker Industries")]
#[command(version)]
#[command(about = "Lightweight dashboard and JSON API for Docker Swarm clusters", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// HTTP listen port
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Docker Engine API address of a swarm manager
    #[arg(long, env = "DOCKER_HOST", default_value = DEFAULT_GATEWAY_URL)]
    gateway: String,

    /// Milliseconds between refresh cycles
    #[arg(long, env = "SWARM_INFO_INTERVAL_MS", default_value_t = 1000)]
    interval_ms: u64,

    /// Upper bound in milliseconds for each listing request
    #[arg(long, env = "SWARM_INFO_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,

    /// Directory holding the dashboard assets
    #[arg(long, env = "SWARM_INFO_STATIC_DIR", default_value = "client")]
    static_dir: PathBuf,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            port: self.port,
            gateway_url: self.gateway,
            refresh_interval: Duration::from_millis(self.interval_ms),
            request_timeout: Duration::from_millis(self.timeout_ms),
            static_dir: self.static_dir,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.into_config().validate().context("invalid configuration")?;

    let gateway =
        gateway::connect(&config).context("failed to create the Docker Engine client")?;
    gateway.ping().await.with_context(|| {
        format!(
            "Docker Engine API at {} is unreachable",
            config.gateway_url
        )
    })?;
    info!("Connected to Docker Engine API at {}", config.gateway_url);

    SwarmInfoDaemon::new(config, gateway)
        .run()
        .await
        .context("swarm-info server failed")?;

    Ok(())
}
