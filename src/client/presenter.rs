// SPDX-License-Identifier: MIT

//! Remaining-count display state.
//!
//! Turns either a server usage snapshot (authenticated flows) or the local
//! guest counter into the state the usage badge renders from.

use crate::models::{UsageSnapshot, FREE_DAILY_LIMIT};

/// What the usage badge shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageDisplay {
    pub remaining: u32,
    pub limit: u32,
    pub pro: bool,
    pub limit_reached: bool,
}

impl UsageDisplay {
    /// From the authoritative server snapshot.
    pub fn from_snapshot(usage: &UsageSnapshot) -> Self {
        Self {
            remaining: usage.remaining_today,
            limit: usage.limit,
            pro: usage.pro,
            limit_reached: !usage.pro && usage.remaining_today == 0,
        }
    }

    /// From the local guest counter.
    pub fn for_guest(count: u32) -> Self {
        let remaining = FREE_DAILY_LIMIT.saturating_sub(count);
        Self {
            remaining,
            limit: FREE_DAILY_LIMIT,
            pro: false,
            limit_reached: remaining == 0,
        }
    }

    /// Badge text.
    pub fn label(&self) -> String {
        if self.pro {
            "Pro · unlimited".to_string()
        } else {
            format!("{} of {} free recipes left", self.remaining, self.limit)
        }
    }
}
