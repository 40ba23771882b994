//! Shortcode entry points
//!
//! Each handler mirrors one shortcode in the host page: parse attributes,
//! aggregate, format. Handlers are total: they always return a string, and
//! upstream failures surface only as the "N/A" sentinel, never as errors.

use crate::client::ZkillApi;
use crate::output;
use crate::stats::{self, EntityType};

/// Rendered when the required `id` attribute is missing or empty
pub const NO_ID: &str = "No ID specified.";

/// Parsed shortcode attributes
#[derive(Debug, Clone, Default)]
pub struct StatAttrs {
    /// Raw comma-separated id attribute, if non-empty
    pub id: Option<String>,
    /// Entity type, corp unless the attribute said "alliance"
    pub entity_type: EntityType,
}

impl StatAttrs {
    pub fn new(id: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id: Some(id.into()),
            entity_type,
        }
    }

    /// Build from raw attribute pairs as the host renderer supplies them.
    /// Unknown attributes are ignored; an absent `type` means corp.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut attrs = StatAttrs::default();
        for (name, value) in pairs {
            match name {
                "id" if !value.is_empty() => attrs.id = Some(value.to_string()),
                "type" => attrs.entity_type = EntityType::parse(value),
                _ => {}
            }
        }
        attrs
    }
}

/// Combined member count block
pub async fn members<C: ZkillApi>(client: &C, attrs: &StatAttrs) -> String {
    let Some(ref ids) = attrs.id else {
        return NO_ID.to_string();
    };

    let combined = stats::combine(client, ids, attrs.entity_type).await;
    if combined.member_count == 0 {
        return output::NOT_AVAILABLE.to_string();
    }
    output::integer_block("Members", combined.member_count)
}

/// Combined ships-destroyed block
pub async fn ships<C: ZkillApi>(client: &C, attrs: &StatAttrs) -> String {
    let Some(ref ids) = attrs.id else {
        return NO_ID.to_string();
    };

    let combined = stats::combine(client, ids, attrs.entity_type).await;
    if combined.ships_destroyed == 0 {
        return output::NOT_AVAILABLE.to_string();
    }
    output::integer_block("Ships Destroyed", combined.ships_destroyed)
}

/// Combined ISK-destroyed block, scaled to m/b/t
pub async fn isk<C: ZkillApi>(client: &C, attrs: &StatAttrs) -> String {
    let Some(ref ids) = attrs.id else {
        return NO_ID.to_string();
    };

    let combined = stats::combine(client, ids, attrs.entity_type).await;
    if combined.isk_destroyed <= 0.0 {
        return output::NOT_AVAILABLE.to_string();
    }
    let (value, suffix) = output::scale_isk(combined.isk_destroyed);
    output::scaled_block("ISK Destroyed", value, suffix)
}
