//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod group;
pub mod pool;
pub mod post;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};
use scribe_types::error::RepositoryError;

/// Timestamps are stored as fixed-width RFC 3339 text (microseconds, `Z`),
/// so lexicographic order in SQL equals chronological order.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}
