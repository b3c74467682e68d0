// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod recipe;
pub mod subscription;
pub mod usage;

pub use recipe::{GeneratedRecipe, Ingredient, RecipeContent, RecipeRequest};
pub use subscription::{Subscription, SubscriptionStatus};
pub use usage::{DailyUsage, GuestUsageRecord, UsageSnapshot, FREE_DAILY_LIMIT};
