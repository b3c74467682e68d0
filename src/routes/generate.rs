// SPDX-License-Identifier: MIT

//! The recipe generation endpoint.
//!
//! Contract: always HTTP 200 except for malformed input (400) and wrong
//! method (405). Business outcomes (limit reached, fallback-served) are
//! conveyed in the body, never the status code, so the client never has to
//! distinguish "error" from "valid no-recipe outcome" at the transport
//! layer. Do not "fix" this into conventional status codes.

use crate::error::{AppError, Result};
use crate::models::{GeneratedRecipe, RecipeRequest, UsageSnapshot};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/generate-recipe",
        post(generate_recipe).fallback(method_not_allowed),
    )
}

/// Generate a recipe for a mood/goal pair.
async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<GeneratedRecipe>> {
    // A body that does not decode at all gets the same 400 contract body as
    // missing fields
    let Json(request) = body
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    tracing::info!(
        user_id = request.user_id.as_deref().unwrap_or("guest"),
        mood_id = %request.mood_id,
        goal_id = %request.goal_id,
        "Recipe generation request"
    );

    let recipe = state.admission.admit(request).await?;
    Ok(Json(recipe))
}

#[derive(Serialize)]
struct MethodNotAllowedBody {
    error: String,
    usage: UsageSnapshot,
}

/// 405 with the documented JSON body (axum's default 405 has an empty body).
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodNotAllowedBody {
            error: "Method not allowed. Use POST to generate recipes.".to_string(),
            usage: UsageSnapshot::denied(),
        }),
    )
}
