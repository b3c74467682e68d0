// SPDX-License-Identifier: MIT

//! Request admission and quota reconciliation.
//!
//! `AdmissionService` is the single authority deciding whether a generation
//! attempt proceeds and what the resulting authoritative usage is. The
//! protocol, per request:
//!
//! 1. validate input (the only caller-visible error)
//! 2. guests skip server-side tracking entirely
//! 3. authenticated: subscription check (fail open to free tier), quota
//!    pre-check (fail toward a conservative count), cap short-circuit that
//!    never touches the provider
//! 4. provider call, with the deterministic fallback on any failure;
//!    fallback-served responses do not consume quota
//! 5. atomic ledger increment only on genuine provider success for non-pro
//!    authenticated users; the charge runs in a spawned task so it lands
//!    even if the caller disconnects, and increment failure is non-fatal
//!    with the pre-increment estimate reported
//!
//! The pre-check in step 3 is a fast-path optimization only; the transaction
//! in step 5 is the sole enforcement point. Two requests racing the same key
//! can at worst overrun the cap by one. Accepted, since the increment
//! itself is atomic and strictly monotonic.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{GeneratedRecipe, Ingredient, RecipeRequest, UsageSnapshot};
use crate::services::fallback::fallback_recipe;
use crate::services::provider::RecipeProvider;
use crate::time_utils::utc_day_key;

/// Used count assumed when the quota read fails: one generation already
/// spent, so the user still gets service but with a pessimistic remaining.
const CONSERVATIVE_USED_COUNT: u32 = 1;

/// Read-only pro-status lookup (billing boundary).
#[async_trait]
pub trait SubscriptionLookup: Send + Sync {
    async fn is_active(&self, user_id: &str) -> Result<bool, AppError>;
}

/// Server-side per-user-per-day usage counter.
///
/// `increment_daily` must be a single indivisible operation: increment the
/// count for `(user_id, day)`, creating the row at count=1 if absent, and
/// return the new count.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    async fn daily_count(&self, user_id: &str, day: &str) -> Result<u32, AppError>;
    async fn increment_daily(&self, user_id: &str, day: &str) -> Result<u32, AppError>;
}

/// The core orchestrator for `POST /generate-recipe`.
pub struct AdmissionService {
    subscriptions: Arc<dyn SubscriptionLookup>,
    ledger: Arc<dyn UsageLedger>,
    provider: Arc<dyn RecipeProvider>,
    limit: u32,
    lookup_timeout: Duration,
}

impl AdmissionService {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionLookup>,
        ledger: Arc<dyn UsageLedger>,
        provider: Arc<dyn RecipeProvider>,
        limit: u32,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            subscriptions,
            ledger,
            provider,
            limit,
            lookup_timeout,
        }
    }

    /// Decide admission, generate, and reconcile the quota.
    ///
    /// Never returns an error for expected failure modes (provider down,
    /// ledger unreachable); every such path resolves to a valid response.
    /// Only malformed input is an `Err`.
    pub async fn admit(&self, request: RecipeRequest) -> Result<GeneratedRecipe, AppError> {
        if request.mood_id.trim().is_empty() || request.goal_id.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Missing required fields: moodId and goalId are required".to_string(),
            ));
        }

        let day = utc_day_key(Utc::now());
        let mut pro = false;
        let mut used: u32 = 0;

        if let Some(user_id) = request.user_id.as_deref() {
            pro = self.pro_status(user_id).await;

            if !pro {
                used = self.current_count(user_id, &day).await;

                if used >= self.limit {
                    tracing::info!(user_id, used, "Daily limit reached, skipping provider call");
                    return Ok(self.limit_reached_recipe(&request));
                }
            }
        } else {
            tracing::debug!("Guest request, no server-side tracking");
        }

        let (content, provider_success) =
            match self.provider.generate(&request.mood_id, &request.goal_id).await {
                Ok(content) => (content, true),
                Err(e) => {
                    tracing::warn!(error = %e, "Provider failed, using fallback recipe");
                    // Fallback responses do not consume a generation
                    (fallback_recipe(&request.mood_id, &request.goal_id), false)
                }
            };

        if provider_success && !pro {
            if let Some(user_id) = request.user_id.as_deref() {
                used = self.charge_generation(user_id, &day, used).await;
            }
        }

        let usage = UsageSnapshot::from_used(used, self.limit, pro);
        tracing::info!(
            remaining = usage.remaining_today,
            pro,
            provider_success,
            "Returning recipe"
        );

        Ok(GeneratedRecipe::from_content(content, &request, usage))
    }

    /// Subscription check with bounded timeout; any failure means free tier,
    /// never a denied request.
    async fn pro_status(&self, user_id: &str) -> bool {
        match tokio::time::timeout(self.lookup_timeout, self.subscriptions.is_active(user_id)).await
        {
            Ok(Ok(active)) => active,
            Ok(Err(e)) => {
                tracing::warn!(user_id, error = %e, "Subscription lookup failed, treating as free tier");
                false
            }
            Err(_) => {
                tracing::warn!(user_id, "Subscription lookup timed out, treating as free tier");
                false
            }
        }
    }

    /// Charge one generation against the ledger, returning the new count.
    ///
    /// The increment runs in a spawned task: the generation is already
    /// consumed at this point, so it must land even if the caller
    /// disconnects and the request future is dropped mid-await. Failure and
    /// timeout are non-fatal; the pre-increment estimate is reported and the
    /// recipe is returned regardless.
    async fn charge_generation(&self, user_id: &str, day: &str, pre_increment: u32) -> u32 {
        let ledger = Arc::clone(&self.ledger);
        let owned_user = user_id.to_string();
        let owned_day = day.to_string();
        let timeout = self.lookup_timeout;

        let charge = tokio::spawn(async move {
            tokio::time::timeout(timeout, ledger.increment_daily(&owned_user, &owned_day)).await
        });

        match charge.await {
            Ok(Ok(Ok(new_count))) => new_count,
            Ok(Ok(Err(e))) => {
                tracing::warn!(user_id, error = %e, "Usage increment failed (non-fatal)");
                pre_increment
            }
            Ok(Err(_)) => {
                tracing::warn!(user_id, "Usage increment timed out (non-fatal)");
                pre_increment
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Usage increment task failed (non-fatal)");
                pre_increment
            }
        }
    }

    /// Quota read with bounded timeout; failure degrades to a fixed
    /// pessimistic count instead of aborting.
    async fn current_count(&self, user_id: &str, day: &str) -> u32 {
        match tokio::time::timeout(self.lookup_timeout, self.ledger.daily_count(user_id, day)).await
        {
            Ok(Ok(count)) => count,
            Ok(Err(e)) => {
                tracing::warn!(user_id, error = %e, "Quota read failed, using conservative count");
                CONSERVATIVE_USED_COUNT
            }
            Err(_) => {
                tracing::warn!(user_id, "Quota read timed out, using conservative count");
                CONSERVATIVE_USED_COUNT
            }
        }
    }

    /// The sentinel response for a capped user. Not a recipe; the
    /// `is_limit_reached` flag tells the client to show the upgrade path.
    fn limit_reached_recipe(&self, request: &RecipeRequest) -> GeneratedRecipe {
        GeneratedRecipe {
            id: Uuid::new_v4(),
            name: "Daily Limit Reached".to_string(),
            emoji: "🚀".to_string(),
            color: "#22c55e".to_string(),
            description: format!(
                "You have reached your daily limit of {} free recipes",
                self.limit
            ),
            ingredients: vec![Ingredient {
                name: "Upgrade to Pro".to_string(),
                amount: "∞".to_string(),
                unit: "recipes".to_string(),
            }],
            steps: vec!["Upgrade to Pro for unlimited daily access".to_string()],
            benefits: vec![
                "Unlimited recipe generation".to_string(),
                "Save unlimited favorites".to_string(),
                "Priority AI processing".to_string(),
            ],
            prep_time: 0,
            servings: 0,
            mood_id: request.mood_id.clone(),
            goal_id: request.goal_id.clone(),
            usage: UsageSnapshot {
                remaining_today: 0,
                limit: self.limit,
                pro: false,
            },
            is_limit_reached: true,
        }
    }
}
