//! HTTP server for swarm-info
//!
//! Owns the listener and the background refresh task.

use super::api::ApiHandler;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::swarm::{Refresher, SwarmState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// swarm-info daemon: refresh loop plus HTTP API
pub struct SwarmInfoDaemon {
    config: Config,
    state: Arc<SwarmState>,
    gateway: Arc<dyn Gateway>,
}

impl SwarmInfoDaemon {
    /// Create a new daemon instance
    pub fn new(config: Config, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            config,
            state: Arc::new(SwarmState::new()),
            gateway,
        }
    }

    /// Address the daemon listens on
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    /// Published swarm state
    pub fn state(&self) -> Arc<SwarmState> {
        self.state.clone()
    }

    /// Start refreshing and serve until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.listen_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let refresher = Refresher::new(self.gateway.clone(), self.state.clone(), &self.config);
        let refresh_task = tokio::spawn(refresher.run());

        let router = ApiHandler::new(self.state.clone(), self.gateway.clone())
            .router(&self.config.static_dir);

        info!("swarm-info listening on {}", listener.local_addr()?);

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        refresh_task.abort();
        served?;

        info!("swarm-info stopped");
        Ok(())
    }
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
