// SPDX-License-Identifier: MIT

//! Recipe request and response types for the generation API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UsageSnapshot;

/// One generation attempt, as posted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Authenticated user id; `None` for guests (no server-side tracking).
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub mood_id: String,
    #[serde(default)]
    pub goal_id: String,
}

/// A single ingredient line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// Recipe content as produced by the provider or the fallback generator.
///
/// Every field carries a safe default so a partially-valid provider payload
/// still yields a usable recipe instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeContent {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_prep_time")]
    pub prep_time: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
}

fn default_name() -> String {
    "Custom Juice".to_string()
}
fn default_emoji() -> String {
    "🥤".to_string()
}
fn default_color() -> String {
    "#22c55e".to_string()
}
fn default_description() -> String {
    "A healthy juice recipe".to_string()
}
fn default_prep_time() -> u32 {
    5
}
fn default_servings() -> u32 {
    1
}

/// The full response artifact: recipe content plus the usage snapshot valid
/// as of response time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub benefits: Vec<String>,
    pub prep_time: u32,
    pub servings: u32,
    pub mood_id: String,
    pub goal_id: String,
    pub usage: UsageSnapshot,
    /// Marks the sentinel "daily limit reached" response, distinguishable
    /// from a normal recipe by the caller.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_limit_reached: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl GeneratedRecipe {
    /// Assemble a response from generated content.
    pub fn from_content(content: RecipeContent, request: &RecipeRequest, usage: UsageSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: content.name,
            emoji: content.emoji,
            color: content.color,
            description: content.description,
            ingredients: content.ingredients,
            steps: content.steps,
            benefits: content.benefits,
            prep_time: content.prep_time,
            servings: content.servings,
            mood_id: request.mood_id.clone(),
            goal_id: request.goal_id.clone(),
            usage,
            is_limit_reached: false,
        }
    }
}
