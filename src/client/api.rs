// SPDX-License-Identifier: MIT

//! Client for the generation API.
//!
//! Checks reachability before sending so that an offline device gets the
//! dedicated `Offline` error (retry is the only recovery) rather than a
//! generic failure. Because the server encodes business outcomes in 200
//! bodies, any non-200 here really is exceptional.

use std::sync::Arc;
use std::time::Duration;

use crate::client::connectivity::ConnectivityProbe;
use crate::models::{GeneratedRecipe, RecipeRequest};

/// Client-observed failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("No internet connection. Please check your connection and try again.")]
    Offline,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True for the pre-flight offline state, which the UI renders
    /// differently from generic errors.
    pub fn is_offline(&self) -> bool {
        matches!(self, ClientError::Offline)
    }
}

/// HTTP client for `POST /generate-recipe`.
pub struct RecipeApiClient {
    http: reqwest::Client,
    base_url: String,
    probe: Arc<dyn ConnectivityProbe>,
    timeout: Duration,
}

impl RecipeApiClient {
    pub fn new(
        base_url: impl Into<String>,
        probe: Arc<dyn ConnectivityProbe>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            probe,
            timeout,
        }
    }

    /// Request a generated recipe for a mood/goal pair.
    pub async fn generate(
        &self,
        user_id: Option<&str>,
        mood_id: &str,
        goal_id: &str,
    ) -> Result<GeneratedRecipe, ClientError> {
        if !self.probe.is_reachable().await {
            return Err(ClientError::Offline);
        }

        let request = RecipeRequest {
            user_id: user_id.map(str::to_string),
            mood_id: mood_id.to_string(),
            goal_id: goal_id.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/generate-recipe", self.base_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "status {}: {}",
                status, body
            )));
        }

        Ok(response.json::<GeneratedRecipe>().await?)
    }
}
