// SPDX-License-Identifier: MIT

//! Billing sync boundary.
//!
//! The billing subsystem (external) posts subscription state here; the core
//! only ever reads the stored status to decide pro access.

use crate::error::Result;
use crate::models::{Subscription, SubscriptionStatus};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sync-subscription", post(sync_subscription))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SyncRequest {
    #[serde(default)]
    user_id: String,
    status: SubscriptionStatus,
    #[serde(default)]
    stripe_customer_id: Option<String>,
    #[serde(default)]
    stripe_subscription_id: Option<String>,
}

#[derive(Serialize)]
struct SyncResponse {
    success: bool,
    subscription: Subscription,
}

/// Upsert a user's subscription record, keyed by user id.
async fn sync_subscription(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<SyncRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = match body {
        Ok(body) => body,
        Err(_) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing userId or status" })),
            )
                .into_response());
        }
    };

    if request.user_id.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing userId or status" })),
        )
            .into_response());
    }

    let subscription = Subscription {
        user_id: request.user_id,
        status: request.status,
        stripe_customer_id: request.stripe_customer_id,
        stripe_subscription_id: request.stripe_subscription_id,
        updated_at: format_utc_rfc3339(Utc::now()),
    };

    state.db.upsert_subscription(&subscription).await?;

    tracing::info!(
        user_id = %subscription.user_id,
        status = ?subscription.status,
        "Subscription synced"
    );

    Ok(Json(SyncResponse {
        success: true,
        subscription,
    })
    .into_response())
}
