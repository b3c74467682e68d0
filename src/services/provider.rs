// SPDX-License-Identifier: MIT

//! External recipe generation provider.
//!
//! `OpenAiProvider` asks a chat-completion model for a recipe in a strict
//! JSON shape. Any transport failure, non-2xx status, or unusable payload
//! surfaces as `AppError::Provider`; the admission service treats all of
//! them the same way (fallback, no quota charge).

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::AppError;
use crate::models::RecipeContent;

/// The generation backend the admission service calls.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn generate(&self, mood_id: &str, goal_id: &str) -> Result<RecipeContent, AppError>;
}

/// OpenAI chat-completion backed provider.
#[derive(Clone)]
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider. A missing or malformed key (keys start with `sk-`)
    /// is kept as `None` so `generate` fails fast into the fallback path.
    pub fn new(api_key: Option<String>, base_url: String, timeout: Duration) -> Self {
        let api_key = api_key.filter(|k| k.starts_with("sk-"));
        if api_key.is_none() {
            tracing::warn!("No valid OpenAI API key configured; all requests will use fallback recipes");
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            timeout,
        }
    }

    fn prompt(mood_id: &str, goal_id: &str) -> String {
        // Raw string needs double-# delimiters: the JSON template contains
        // `"#22c55e"`, whose `"#` would terminate an `r#"..."#` literal.
        format!(
            r##"Create a healthy juice recipe for someone feeling "{mood_id}" who wants to achieve "{goal_id}".

Requirements:
- Use only fruits, vegetables, and herbs (no supplements)
- Keep it simple and practical
- Focus on natural ingredients
- Make it tasty and nutritious

Return ONLY valid JSON with this exact structure:
{{
  "name": "Recipe Name",
  "emoji": "🥤",
  "color": "#22c55e",
  "description": "Short description",
  "ingredients": [{{"name":"ingredient","amount":"1","unit":"cup"}}],
  "steps": ["Step 1", "Step 2"],
  "benefits": ["Benefit 1", "Benefit 2"],
  "prepTime": 5,
  "servings": 1
}}"##
        )
    }
}

#[async_trait]
impl RecipeProvider for OpenAiProvider {
    async fn generate(&self, mood_id: &str, goal_id: &str) -> Result<RecipeContent, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Provider("no API key configured".to_string()))?;

        let body = serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                {
                    "role": "system",
                    "content": "You are a nutritionist creating healthy juice recipes. Always respond with valid JSON only."
                },
                {
                    "role": "user",
                    "content": Self::prompt(mood_id, goal_id)
                }
            ],
            "max_tokens": 1000,
            "temperature": 0.7,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Provider(format!(
                "provider returned status {}",
                status
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("unparsable response: {}", e)))?;

        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| AppError::Provider("no recipe content generated".to_string()))?;

        // Missing optional fields are filled with safe defaults by serde;
        // only a payload that is not JSON at all is rejected.
        let recipe: RecipeContent = serde_json::from_str(content)
            .map_err(|e| AppError::Provider(format!("unparsable recipe payload: {}", e)))?;

        tracing::debug!(mood_id, goal_id, recipe = %recipe.name, "Provider recipe parsed");

        Ok(recipe)
    }
}
