//! Mock zKillboard client for testing
//!
//! Serves configured payloads without the network and records every call
//! so tests can assert on fetch counts.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::{RawStats, ZkillApi};
use crate::error::{ApiError, Result};
use crate::stats::EntityRef;

/// Mock API client for testing.
///
/// Entities without a configured payload resolve as 404s, which the
/// `fetch` contract collapses to absence.
#[derive(Default)]
pub struct MockZkillClient {
    responses: Mutex<HashMap<EntityRef, Value>>,
    calls: Mutex<Vec<EntityRef>>,
}

impl MockZkillClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the payload returned for one entity
    pub fn with_stats(self, entity: EntityRef, payload: Value) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity, payload);
        self
    }

    /// Number of stats calls made so far
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Every entity requested, in call order
    pub fn calls(&self) -> Vec<EntityRef> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ZkillApi for MockZkillClient {
    async fn stats(&self, entity: &EntityRef) -> Result<RawStats> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entity.clone());

        let payload = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entity)
            .cloned();

        match payload {
            Some(value) => RawStats::from_value(value).ok_or_else(|| {
                ApiError::InvalidResponse("Payload is not a JSON object".to_string()).into()
            }),
            None => Err(ApiError::Status(reqwest::StatusCode::NOT_FOUND).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EntityType;
    use serde_json::json;

    #[tokio::test]
    async fn test_configured_entity_resolves() {
        let entity = EntityRef::new("1", EntityType::Corp);
        let mock = MockZkillClient::new().with_stats(entity.clone(), json!({"shipsDestroyed": 2}));

        let stats = mock.stats(&entity).await.unwrap();
        assert_eq!(stats.ships_destroyed(), Some(2));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_entity_is_absent() {
        let mock = MockZkillClient::new();
        let entity = EntityRef::new("404", EntityType::Corp);

        assert!(mock.fetch(&entity).await.is_none());
        assert_eq!(mock.calls(), vec![entity]);
    }
}
