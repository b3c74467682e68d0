// SPDX-License-Identifier: MIT

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Subscription records, keyed by user id
    pub const USER_SUBSCRIPTIONS: &str = "user_subscriptions";
    /// Daily usage counters, keyed by `{user_id}_{day}`
    pub const USAGE_DAILY: &str = "usage_daily";
}
