//! Markup rendering for stat blocks
//!
//! A block carries its final value in `data-count` and its unit in
//! `data-suffix`; the footer script animates the visible number from 0 to
//! `data-count` when the block first scrolls into view. This module only
//! guarantees those attributes are present, escaped, and correct.

/// Rendered when a metric aggregates to zero or nothing resolves
pub const NOT_AVAILABLE: &str = "N/A";

/// Countup animation script for the page footer
const FOOTER_JS: &str = include_str!("../../assets/zkill-stat.js");

/// Stat block styles
const FOOTER_CSS: &str = include_str!("../../assets/zkill-stat.css");

/// Pick the magnitude bucket for an ISK value.
///
/// Largest applicable bucket wins: trillions, billions, millions, or the
/// raw value with no suffix.
pub fn scale_isk(value: f64) -> (f64, &'static str) {
    if value >= 1e12 {
        (value / 1e12, "t")
    } else if value >= 1e9 {
        (value / 1e9, "b")
    } else if value >= 1e6 {
        (value / 1e6, "m")
    } else {
        (value, "")
    }
}

/// Render an integer-mode stat block (members, ships): no suffix, no
/// decimals.
pub fn integer_block(label: &str, value: u64) -> String {
    render(label, &value.to_string(), "")
}

/// Render a scaled-decimal stat block (ISK): value rounded to two decimal
/// places, suffix from [`scale_isk`].
pub fn scaled_block(label: &str, value: f64, suffix: &str) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    render(label, &rounded.to_string(), suffix)
}

/// The footer `<script>`/`<style>` block the host page embeds once
pub fn footer_assets() -> String {
    format!(
        "<script>\n{}</script>\n<style>\n{}</style>",
        FOOTER_JS, FOOTER_CSS
    )
}

fn render(label: &str, count: &str, suffix: &str) -> String {
    format!(
        "<div class='zkill-stat'>\
         <span class='label'>{}</span>\
         <span class='number' data-count='{}' data-suffix='{}'>0</span>\
         </div>",
        escape_attr(label),
        escape_attr(count),
        escape_attr(suffix),
    )
}

/// Escape text for HTML element and attribute contexts
fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
