//! Refresh scheduler
//!
//! Polls the gateway on a fixed interval and publishes each successful
//! cycle. A failed cycle is logged and skipped; the previously published
//! generation stays in place.

use super::{build_aggregate, build_snapshot, Listings, SwarmState};
use crate::config::Config;
use crate::error::{Result, SwarmInfoError};
use crate::gateway::Gateway;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Background refresher, the sole writer of [`SwarmState`]
pub struct Refresher {
    gateway: Arc<dyn Gateway>,
    state: Arc<SwarmState>,
    /// Pause between cycles
    interval: Duration,
    /// Upper bound for fetching all three listings
    fetch_timeout: Duration,
}

impl Refresher {
    /// Create a refresher from the runtime configuration
    pub fn new(gateway: Arc<dyn Gateway>, state: Arc<SwarmState>, config: &Config) -> Self {
        Self {
            gateway,
            state,
            interval: config.refresh_interval,
            fetch_timeout: config.request_timeout * 3,
        }
    }

    /// Run one cycle: fetch, build both views, publish.
    ///
    /// Returns the published generation number. On error nothing is
    /// published.
    pub async fn refresh_once(&self) -> Result<u64> {
        let listings = tokio::time::timeout(self.fetch_timeout, Listings::fetch(&*self.gateway))
            .await
            .map_err(|_| {
                SwarmInfoError::Timeout(format!(
                    "listings not fetched within {:?}",
                    self.fetch_timeout
                ))
            })??;

        let flat = build_snapshot(&listings);
        let aggregate = build_aggregate(&flat);

        let (nodes, services, containers) =
            (flat.nodes.len(), flat.services.len(), flat.containers().len());
        let generation = self.state.publish(flat, aggregate);

        debug!(
            generation,
            nodes, services, containers, "Published swarm snapshot"
        );
        Ok(generation)
    }

    /// Refresh forever
    pub async fn run(self) {
        info!("Refreshing swarm state every {:?}", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.refresh_once().await {
                error!("Swarm refresh failed, keeping previous snapshot: {}", e);
            }
        }
    }
}
