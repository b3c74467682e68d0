// SPDX-License-Identifier: MIT

//! Shared helpers for date/time handling.
//!
//! The day key is the partition for all usage counters. Client and server
//! must agree on it, so both derive it here and both use UTC.

use chrono::{DateTime, SecondsFormat, Utc};

/// Derive the calendar-day key (`YYYY-MM-DD`) for a UTC timestamp.
pub fn utc_day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Today's day key in UTC.
pub fn today_utc() -> String {
    utc_day_key(Utc::now())
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
