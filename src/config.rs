// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::models::FREE_DAILY_LIMIT;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    /// OpenAI API key. Absent or malformed means the provider is treated as
    /// unavailable and every request is served from the fallback generator.
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL (overridable for local stubs)
    pub openai_base_url: String,
    /// Bound on the provider call
    pub provider_timeout: Duration,
    /// Bound on subscription/quota lookups
    pub lookup_timeout: Duration,

    /// Daily generation cap for non-pro identities
    pub free_daily_limit: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            provider_timeout: Duration::from_secs(
                env::var("PROVIDER_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .unwrap_or(20),
            ),
            lookup_timeout: Duration::from_secs(
                env::var("LOOKUP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            ),

            free_daily_limit: FREE_DAILY_LIMIT,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:8081".to_string(),
            port: 8080,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            provider_timeout: Duration::from_secs(1),
            lookup_timeout: Duration::from_millis(200),
            free_daily_limit: FREE_DAILY_LIMIT,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
