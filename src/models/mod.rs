//! Data models for the café menu backend.
//!
//! Field names serialize in camelCase to match what the menu frontend reads.

mod menu_item;
mod offer;
mod stats;

pub use menu_item::*;
pub use offer::*;
pub use stats::*;

use chrono::{SecondsFormat, Utc};

/// Current time as a fixed-width RFC 3339 string (millisecond precision, UTC).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
