// SPDX-License-Identifier: MIT

//! Deterministic local recipe generator.
//!
//! Used whenever the external provider is unavailable or returns unusable
//! output. Pure and side-effect free: no network, no storage. The table is
//! keyed by `"{mood_id}-{goal_id}"`; unrecognized pairs get the
//! `tired-energy` entry.

use crate::models::{Ingredient, RecipeContent};

fn ingredient(name: &str, amount: &str, unit: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        amount: amount.to_string(),
        unit: unit.to_string(),
    }
}

fn energizing_green_boost() -> RecipeContent {
    RecipeContent {
        name: "Energizing Green Boost".to_string(),
        emoji: "⚡".to_string(),
        color: "#22c55e".to_string(),
        description: "A natural energy boost to combat fatigue".to_string(),
        ingredients: vec![
            ingredient("Spinach", "2", "cups"),
            ingredient("Green apple", "1", "medium"),
            ingredient("Lemon", "1/2", "juice of"),
            ingredient("Ginger", "1", "inch piece"),
        ],
        steps: vec![
            "Wash all ingredients thoroughly".to_string(),
            "Core the apple and cut into chunks".to_string(),
            "Add spinach and apple to blender".to_string(),
            "Add fresh lemon juice and ginger".to_string(),
            "Blend until smooth and creamy".to_string(),
            "Serve immediately over ice".to_string(),
        ],
        benefits: vec![
            "High in iron for natural energy".to_string(),
            "Vitamin C boosts immunity".to_string(),
            "Ginger aids digestion".to_string(),
        ],
        prep_time: 5,
        servings: 1,
    }
}

fn calming_citrus_blend() -> RecipeContent {
    RecipeContent {
        name: "Calming Citrus Blend".to_string(),
        emoji: "🧘".to_string(),
        color: "#f59e0b".to_string(),
        description: "A soothing blend to reduce stress and improve focus".to_string(),
        ingredients: vec![
            ingredient("Orange", "2", "medium"),
            ingredient("Carrot", "1", "large"),
            ingredient("Turmeric", "1/2", "tsp"),
            ingredient("Honey", "1", "tsp"),
        ],
        steps: vec![
            "Peel oranges and carrot".to_string(),
            "Cut carrot into small pieces".to_string(),
            "Juice oranges and carrot".to_string(),
            "Stir in turmeric and honey".to_string(),
            "Mix well and serve fresh".to_string(),
        ],
        benefits: vec![
            "Vitamin C reduces stress hormones".to_string(),
            "Beta-carotene supports brain function".to_string(),
            "Turmeric has anti-inflammatory properties".to_string(),
        ],
        prep_time: 5,
        servings: 1,
    }
}

/// Generate a fallback recipe for a `(mood, goal)` pair.
pub fn fallback_recipe(mood_id: &str, goal_id: &str) -> RecipeContent {
    match format!("{}-{}", mood_id, goal_id).as_str() {
        "tired-energy" => energizing_green_boost(),
        "stressed-focus" => calming_citrus_blend(),
        // Default entry for unrecognized pairs
        _ => energizing_green_boost(),
    }
}
