//! Cache-backed rendering of zKillboard combat statistics.
//!
//! The pipeline: a host page renderer hands a shortcode's attributes to one
//! of the entry points in [`shortcode`]; the raw id attribute is normalized,
//! each id is resolved through a TTL cache in front of the zKillboard stats
//! API, the results are summed, and the total is rendered as an
//! animated-counter stat block (or a sentinel string when nothing resolves).

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod shortcode;
pub mod stats;
