//! Published swarm state
//!
//! The refresh loop is the only writer. Each successful cycle is published
//! as one [`Generation`] holding both views, swapped in with a single
//! atomic store. Readers load an `Arc` to one generation and never block
//! the writer.

use super::Swarm;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// One complete, atomically published refresh result
#[derive(Debug, Default)]
pub struct Generation {
    /// Sequence number; 0 before the first successful refresh
    pub number: u64,
    /// When the listings were fetched
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Flat view
    pub flat: Arc<Swarm>,
    /// Aggregate view
    pub aggregate: Arc<Swarm>,
}

/// Summary of a generation without its payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInfo {
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub nodes: usize,
    pub services: usize,
    pub containers: usize,
}

impl Generation {
    pub fn info(&self) -> GenerationInfo {
        GenerationInfo {
            generation: self.number,
            refreshed_at: self.refreshed_at,
            nodes: self.flat.nodes.len(),
            services: self.flat.services.len(),
            containers: self.flat.containers().len(),
        }
    }
}

/// Holder of the latest published generation
pub struct SwarmState {
    current: ArcSwap<Generation>,
}

impl SwarmState {
    /// Create a state holding the empty generation 0
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Generation::default()),
        }
    }

    /// Latest generation
    pub fn current(&self) -> Arc<Generation> {
        self.current.load_full()
    }

    /// Latest flat view
    pub fn flat_snapshot(&self) -> Arc<Swarm> {
        self.current.load().flat.clone()
    }

    /// Latest aggregate view
    pub fn aggregate_view(&self) -> Arc<Swarm> {
        self.current.load().aggregate.clone()
    }

    /// Publish a flat view and its aggregate as the next generation.
    ///
    /// Must only be called from the refresh loop; concurrent publishers
    /// could hand out the same number twice.
    pub fn publish(&self, flat: Swarm, aggregate: Swarm) -> u64 {
        let number = self.current.load().number + 1;

        self.current.store(Arc::new(Generation {
            number,
            refreshed_at: Some(Utc::now()),
            flat: Arc::new(flat),
            aggregate: Arc::new(aggregate),
        }));

        number
    }
}

impl Default for SwarmState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fake;
    use crate::swarm::{build_aggregate, build_snapshot, Listings};

    fn views(task_count: usize) -> (Swarm, Swarm) {
        let tasks = (0..task_count)
            .map(|i| fake::task(&format!("t{}", i), "s1", "n1", "running"))
            .collect();
        let flat = build_snapshot(&Listings {
            nodes: vec![fake::node("n1", "alpha")],
            tasks,
            services: vec![fake::service("s1", "web", Some(1))],
        });
        let aggregate = build_aggregate(&flat);
        (flat, aggregate)
    }

    #[test]
    fn test_initial_generation_is_empty() {
        let state = SwarmState::new();
        let generation = state.current();
        assert_eq!(generation.number, 0);
        assert!(generation.refreshed_at.is_none());
        assert!(state.flat_snapshot().nodes.is_empty());
        assert!(state.aggregate_view().services.is_empty());
    }

    #[test]
    fn test_publish_replaces_both_views() {
        let state = SwarmState::new();
        let (flat, aggregate) = views(2);

        assert_eq!(state.publish(flat, aggregate), 1);

        let generation = state.current();
        assert_eq!(generation.number, 1);
        assert_eq!(generation.flat.containers().len(), 2);
        assert_eq!(
            generation.aggregate.nodes[0].containers.as_ref().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_reader_keeps_its_generation() {
        let state = SwarmState::new();
        let (flat, aggregate) = views(1);
        state.publish(flat, aggregate);

        let held = state.current();
        let (flat, aggregate) = views(3);
        state.publish(flat, aggregate);

        assert_eq!(held.number, 1);
        assert_eq!(held.flat.containers().len(), 1);
        assert_eq!(state.current().number, 2);
        assert_eq!(state.flat_snapshot().containers().len(), 3);
    }

    #[test]
    fn test_concurrent_readers_see_consistent_pairs() {
        let state = Arc::new(SwarmState::new());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let generation = state.current();
                        let nested = generation
                            .aggregate
                            .nodes
                            .first()
                            .and_then(|n| n.containers.as_ref())
                            .map(|c| c.len())
                            .unwrap_or(0);
                        assert_eq!(generation.flat.containers().len(), nested);
                    }
                })
            })
            .collect();

        for i in 0..200 {
            let (flat, aggregate) = views(i % 5);
            state.publish(flat, aggregate);
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_info() {
        let state = SwarmState::new();
        let (flat, aggregate) = views(2);
        state.publish(flat, aggregate);

        let info = state.current().info();
        assert_eq!(info.generation, 1);
        assert_eq!(info.nodes, 1);
        assert_eq!(info.containers, 2);
    }
}
