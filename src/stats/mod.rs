//! Entity identifiers and stat aggregation

use futures::future::join_all;

use crate::client::{RawStats, ZkillApi};

/// Upper bound on ids accepted from one shortcode attribute.
///
/// Bounds outbound request fan-out for a single page render.
pub const MAX_IDS: usize = 10;

/// Entity kind tracked by the stats API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// Corporation, the default when the attribute is absent or unrecognized
    #[default]
    Corp,
    Alliance,
}

impl EntityType {
    /// Parse a shortcode `type` attribute. Anything but the literal
    /// "alliance" is a corporation; there is no error case.
    pub fn parse(raw: &str) -> Self {
        if raw == "alliance" {
            EntityType::Alliance
        } else {
            EntityType::Corp
        }
    }

    /// Path segment the stats API uses for this entity kind
    pub fn type_key(&self) -> &'static str {
        match self {
            EntityType::Corp => "corporationID",
            EntityType::Alliance => "allianceID",
        }
    }
}

/// One (id, type) pair resolvable against the stats API.
///
/// Constructed fresh per request from normalized input; the id is always a
/// non-empty digit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub id: String,
    pub entity_type: EntityType,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id: id.into(),
            entity_type,
        }
    }
}

/// Sanitize a raw comma-separated id attribute.
///
/// Strips every character outside `[0-9,]`, drops empty parts, dedupes
/// preserving first-seen order, and caps the result at [`MAX_IDS`]. Total:
/// an all-invalid input yields an empty list. Keeps cache keys and request
/// URLs digit-only no matter what the page author (or an attacker) wrote.
pub fn normalize_ids(raw: &str) -> Vec<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    let mut ids: Vec<String> = Vec::new();
    for part in cleaned.split(',') {
        if part.is_empty() || ids.iter().any(|seen| seen == part) {
            continue;
        }
        ids.push(part.to_string());
        if ids.len() == MAX_IDS {
            break;
        }
    }
    ids
}

/// Aggregate stats folded across one or more entities
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombinedStats {
    pub member_count: u64,
    pub ships_destroyed: u64,
    pub isk_destroyed: f64,
}

impl CombinedStats {
    /// Fold one payload in. Fields missing from the payload contribute
    /// nothing to that field only; every contribution is non-negative, so
    /// each field is monotonically non-decreasing across the fold.
    fn fold(&mut self, stats: &RawStats) {
        if let Some(n) = stats.member_count() {
            self.member_count = self.member_count.saturating_add(n);
        }
        if let Some(n) = stats.ships_destroyed() {
            self.ships_destroyed = self.ships_destroyed.saturating_add(n);
        }
        if let Some(v) = stats.isk_destroyed() {
            self.isk_destroyed += v;
        }
    }
}

/// Fetch and sum stats for every id in a raw shortcode attribute.
///
/// Ids that fail to resolve contribute nothing. The fold is commutative
/// and associative, so the per-id fetches run concurrently and arrival
/// order does not affect the result.
pub async fn combine<C: ZkillApi>(
    client: &C,
    raw_ids: &str,
    entity_type: EntityType,
) -> CombinedStats {
    let refs: Vec<EntityRef> = normalize_ids(raw_ids)
        .into_iter()
        .map(|id| EntityRef::new(id, entity_type))
        .collect();

    let results = join_all(refs.iter().map(|entity| client.fetch(entity))).await;

    let mut combined = CombinedStats::default();
    for stats in results.into_iter().flatten() {
        combined.fold(&stats);
    }
    combined
}
