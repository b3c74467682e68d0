// SPDX-License-Identifier: MIT

//! Usage counters and the snapshot reported to clients.

use serde::{Deserialize, Serialize};

/// Daily generation cap for non-pro identities (guest or free tier).
pub const FREE_DAILY_LIMIT: u32 = 3;

/// Authoritative usage state as of response time.
///
/// Derived, never persisted: always `limit - used` clamped to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub remaining_today: u32,
    pub limit: u32,
    pub pro: bool,
}

impl UsageSnapshot {
    /// Snapshot for a given used count.
    pub fn from_used(used: u32, limit: u32, pro: bool) -> Self {
        Self {
            remaining_today: limit.saturating_sub(used),
            limit,
            pro,
        }
    }

    /// The snapshot attached to denied or malformed-input responses.
    pub fn denied() -> Self {
        Self {
            remaining_today: 0,
            limit: FREE_DAILY_LIMIT,
            pro: false,
        }
    }
}

/// Per-user per-day generation counter, stored in `usage_daily`.
///
/// Document ID is `{user_id}_{day}`. Created lazily by the first atomic
/// increment of the day; never deleted. A new day simply uses a new key,
/// so no reset job exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUsage {
    pub user_id: String,
    /// UTC calendar date, `YYYY-MM-DD`
    pub day: String,
    #[serde(default)]
    pub gen_count: u32,
    /// Last increment timestamp (RFC3339)
    #[serde(default)]
    pub updated_at: String,
}

/// Guest usage entry persisted on the device under a day-scoped key.
///
/// Owned exclusively by the device; never synced to the server. Lost on
/// reinstall, which is acceptable since guest identity is ephemeral.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestUsageRecord {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub last_updated: String,
}
