//! zKillboard stats API client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::stats::EntityRef;

#[cfg(test)]
pub mod mock;
pub mod zkill;

#[cfg(test)]
pub use mock::MockZkillClient;
pub use zkill::ZkillClient;

/// zKillboard stats API
#[async_trait]
pub trait ZkillApi: Send + Sync {
    /// Fetch the raw stats payload for one entity
    async fn stats(&self, entity: &EntityRef) -> Result<RawStats>;

    /// Like [`stats`](ZkillApi::stats), but collapses every failure mode
    /// (timeout, transport error, bad status, malformed body) to absence.
    /// The shortcode layer only needs "usable" vs "not usable"; the cause
    /// survives in the debug log.
    async fn fetch(&self, entity: &EntityRef) -> Option<RawStats> {
        match self.stats(entity).await {
            Ok(stats) => Some(stats),
            Err(err) => {
                log::debug!(
                    "Stats fetch failed for {} {}: {}",
                    entity.entity_type.type_key(),
                    entity.id,
                    err
                );
                None
            }
        }
    }
}

/// Decoded stats payload for one entity.
///
/// The API returns a large free-form object; only three optional numeric
/// fields are trusted. An absent or non-numeric field reads as `None`,
/// which is distinct from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawStats(Value);

impl RawStats {
    /// Wrap a decoded payload, rejecting anything but a JSON object
    pub fn from_value(value: Value) -> Option<Self> {
        value.is_object().then_some(Self(value))
    }

    /// `info.memberCount`, if present and numeric
    pub fn member_count(&self) -> Option<u64> {
        self.0.get("info")?.get("memberCount")?.as_u64()
    }

    /// `shipsDestroyed`, if present and numeric
    pub fn ships_destroyed(&self) -> Option<u64> {
        self.0.get("shipsDestroyed")?.as_u64()
    }

    /// `iskDestroyed`, if present, numeric and non-negative.
    ///
    /// Negative values read as absent so the aggregation fold stays
    /// monotonic, same as the integer fields get from `as_u64`.
    pub fn isk_destroyed(&self) -> Option<f64> {
        self.0
            .get("iskDestroyed")?
            .as_f64()
            .filter(|v| *v >= 0.0)
    }
}
