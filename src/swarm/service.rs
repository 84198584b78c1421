//! Swarm services

use super::container::Container;
use crate::gateway::ServiceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Swarm service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service ID
    pub id: String,
    /// Service name
    pub name: String,
    /// Desired replicas; `None` for global services
    pub replicas: Option<u64>,
    /// Containers of this service; only set in the aggregate view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Map a service listing record
    pub fn from_record(record: &ServiceRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.spec.name.clone(),
            replicas: record
                .spec
                .mode
                .replicated
                .as_ref()
                .and_then(|mode| mode.replicas),
            containers: None,
            created_at: record.created_at.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fake;

    #[test]
    fn test_replicated_service() {
        let service = Service::from_record(&fake::service("s1", "web", Some(3)));
        assert_eq!(service.name, "web");
        assert_eq!(service.replicas, Some(3));
    }

    #[test]
    fn test_global_service_has_no_replica_count() {
        let service = Service::from_record(&fake::service("s2", "agent", None));
        assert_eq!(service.replicas, None);

        let json = serde_json::to_value(&service).unwrap();
        assert!(json["replicas"].is_null());
    }

    #[test]
    fn test_zero_replicas_stay_zero() {
        let service = Service::from_record(&fake::service("s3", "idle", Some(0)));
        assert_eq!(service.replicas, Some(0));
    }
}
