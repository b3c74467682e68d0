// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Subscriptions (billing state, read by the admission service)
//! - Daily usage counters (the quota ledger)
//!
//! The daily counter increment runs inside a Firestore transaction so that
//! concurrent requests on the same `(user, day)` key cannot lose updates;
//! it is the sole mutation path for the ledger.

use async_trait::async_trait;
use chrono::Utc;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DailyUsage, Subscription};
use crate::services::admission::{SubscriptionLookup, UsageLedger};
use crate::time_utils::format_utc_rfc3339;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called, which is
    /// exactly what the degraded-dependency tests lean on.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Subscription Operations ─────────────────────────────────

    /// Get a user's subscription record, if one exists.
    pub async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_SUBSCRIPTIONS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a subscription record (billing sync boundary).
    pub async fn upsert_subscription(&self, subscription: &Subscription) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_SUBSCRIPTIONS)
            .document_id(&subscription.user_id)
            .object(subscription)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Usage Ledger Operations ─────────────────────────────────

    fn usage_doc_id(user_id: &str, day: &str) -> String {
        format!("{}_{}", user_id, day)
    }

    /// Read the usage counter for `(user_id, day)`.
    ///
    /// Absence means no generation happened that day yet; rows for past days
    /// are simply never read again (day rollover needs no reset job).
    pub async fn get_daily_usage(
        &self,
        user_id: &str,
        day: &str,
    ) -> Result<Option<DailyUsage>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USAGE_DAILY)
            .obj()
            .one(&Self::usage_doc_id(user_id, day))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Atomically increment the usage counter for `(user_id, day)`, creating
    /// the row at count=1 if absent. Returns the post-increment count.
    ///
    /// Runs inside `run_transaction` so the read is registered with the
    /// transaction for conflict detection: two concurrent increments on the
    /// same key cannot both read N and commit N+1, the losing commit is
    /// retried with fresh data.
    pub async fn increment_daily_usage(&self, user_id: &str, day: &str) -> Result<u32, AppError> {
        let doc_id = Self::usage_doc_id(user_id, day);

        let new_count = self
            .get_client()?
            .run_transaction(|db, transaction| {
                let doc_id = doc_id.clone();
                let user_id = user_id.to_string();
                let day = day.to_string();
                Box::pin(async move {
                    let current: Option<DailyUsage> = db
                        .fluent()
                        .select()
                        .by_id_in(collections::USAGE_DAILY)
                        .obj()
                        .one(&doc_id)
                        .await?;

                    let new_count = current.map(|u| u.gen_count).unwrap_or(0) + 1;
                    let record = DailyUsage {
                        user_id,
                        day,
                        gen_count: new_count,
                        updated_at: format_utc_rfc3339(Utc::now()),
                    };

                    db.fluent()
                        .update()
                        .in_col(collections::USAGE_DAILY)
                        .document_id(&doc_id)
                        .object(&record)
                        .add_to_transaction(transaction)?;

                    Ok(new_count)
                })
            })
            .await
            .map_err(|e| AppError::Database(format!("Usage increment transaction failed: {}", e)))?;

        tracing::debug!(user_id, day, new_count, "Usage counter incremented");

        Ok(new_count)
    }
}

#[async_trait]
impl SubscriptionLookup for FirestoreDb {
    async fn is_active(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self
            .get_subscription(user_id)
            .await?
            .map(|s| s.is_active())
            .unwrap_or(false))
    }
}

#[async_trait]
impl UsageLedger for FirestoreDb {
    async fn daily_count(&self, user_id: &str, day: &str) -> Result<u32, AppError> {
        Ok(self
            .get_daily_usage(user_id, day)
            .await?
            .map(|u| u.gen_count)
            .unwrap_or(0))
    }

    async fn increment_daily(&self, user_id: &str, day: &str) -> Result<u32, AppError> {
        self.increment_daily_usage(user_id, day).await
    }
}
