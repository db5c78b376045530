//! Date formatting helpers

use chrono::{DateTime, Utc};

/// Short year-month-day datestamp shown in post listings and footers.
/// Year first is the only ordering that never ambiguates day and month.
pub fn datestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Precise timestamp offered on hover
pub fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y, %H:%M UTC").to_string()
}

/// Machine-readable form for `datetime` attributes and sitemap entries
pub fn iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
