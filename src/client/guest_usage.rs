// SPDX-License-Identifier: MIT

//! Local per-device daily counter for unauthenticated users.
//!
//! Entries live under a day-scoped key (`guestUsage:<UTC date>`), so a new
//! day simply reads a fresh key; yesterday's entry is never touched again
//! (lazy reset, no scheduled job). The day key uses the same UTC derivation
//! as the server ledger, so a device clock in another time zone cannot mint
//! extra generations.
//!
//! The counter is advisory: a crash between read and write can lose at most
//! one increment, which is acceptable at these stakes. Increments are still
//! serialized behind a mutex so interleaved read-modify-write within the
//! process cannot drop updates.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::client::storage::ClientStorage;
use crate::models::{GuestUsageRecord, FREE_DAILY_LIMIT};
use crate::time_utils::{format_utc_rfc3339, utc_day_key};

const KEY_PREFIX: &str = "guestUsage:";

/// Guest usage counter over client storage.
pub struct GuestQuotaStore {
    storage: ClientStorage,
    limit: u32,
    write_lock: Mutex<()>,
}

impl GuestQuotaStore {
    pub fn new(storage: ClientStorage) -> Self {
        Self {
            storage,
            limit: FREE_DAILY_LIMIT,
            write_lock: Mutex::new(()),
        }
    }

    fn key_for(day: &str) -> String {
        format!("{}{}", KEY_PREFIX, day)
    }

    /// Count recorded for a specific day key; 0 when no record exists.
    pub fn count_for(&self, day: &str) -> u32 {
        self.storage
            .get::<GuestUsageRecord>(&Self::key_for(day))
            .map(|r| r.count)
            .unwrap_or(0)
    }

    /// Count recorded for today (UTC).
    pub fn count_today(&self) -> u32 {
        self.count_for(&utc_day_key(Utc::now()))
    }

    /// Increment the counter for a specific day key, returning the new count.
    pub async fn increment_for(&self, day: &str) -> u32 {
        let _guard = self.write_lock.lock().await;
        let new_count = self.count_for(day) + 1;
        self.storage.set(
            &Self::key_for(day),
            &GuestUsageRecord {
                count: new_count,
                last_updated: format_utc_rfc3339(Utc::now()),
            },
        );
        new_count
    }

    /// Increment today's counter, returning the new count.
    pub async fn increment(&self) -> u32 {
        self.increment_for(&utc_day_key(Utc::now())).await
    }

    /// Remaining generations for a given count: `max(0, limit - count)`.
    pub fn remaining(&self, count: u32) -> u32 {
        self.limit.saturating_sub(count)
    }

    /// Whether today's count has exhausted the free tier.
    pub fn has_reached_limit(&self) -> bool {
        self.remaining(self.count_today()) == 0
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}
