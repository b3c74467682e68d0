// SPDX-License-Identifier: MIT

//! Subscription records, owned by the billing subsystem.
//!
//! The core only reads `status == active` to decide pro status; everything
//! else here exists for the `/sync-subscription` boundary.

use serde::{Deserialize, Serialize};

/// Billing state of a user's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Free,
    Active,
    Canceled,
}

/// Subscription record stored in `user_subscriptions`, keyed by user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: String,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_subscription_id: Option<String>,
    /// Last sync timestamp (RFC3339)
    #[serde(default)]
    pub updated_at: String,
}

impl Subscription {
    /// Whether this record grants pro access (quota bypass).
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}
