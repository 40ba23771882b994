//! TTL cache in front of the stats API
//!
//! One successful fetch per entity per hour; everything else is served
//! from the store. Expiry is lazy: stale entries are simply skipped on
//! read, never explicitly destroyed.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// How long a fetched stats payload stays fresh
pub const STATS_TTL: Duration = Duration::from_secs(60 * 60); // 1 hr

pub use client::CachedZkillClient;
pub use key::cache_key;
pub use storage::{CacheStats, CacheStore, MemoryCache, SqliteCache};
