// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod admission;
pub mod fallback;
pub mod provider;

pub use admission::{AdmissionService, SubscriptionLookup, UsageLedger};
pub use fallback::fallback_recipe;
pub use provider::{OpenAiProvider, RecipeProvider};
