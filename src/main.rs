// SPDX-License-Identifier: MIT

//! MoodJuice API Server
//!
//! Serves the recipe generation endpoint: decides per request whether a
//! user (guest or authenticated, free or paid) may generate, calls the
//! provider with a deterministic fallback, and reconciles the daily quota
//! counter with the outcome.

use moodjuice::{
    config::Config,
    db::FirestoreDb,
    services::{AdmissionService, OpenAiProvider},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting MoodJuice API");

    // Initialize Firestore database (quota ledger + subscription records)
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize recipe provider; without a valid key every request is
    // served from the fallback generator
    let provider = Arc::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.provider_timeout,
    ));
    tracing::info!(
        provider_configured = config.openai_api_key.is_some(),
        "Recipe provider initialized"
    );

    // The admission service gets the database as both the subscription
    // lookup and the usage ledger
    let admission = AdmissionService::new(
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        provider,
        config.free_daily_limit,
        config.lookup_timeout,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        admission,
    });

    // Build router
    let app = moodjuice::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moodjuice=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
