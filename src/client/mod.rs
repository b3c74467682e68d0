// SPDX-License-Identifier: MIT

//! Client-side support: the usage caches and helpers the mobile app builds
//! on. Everything here tolerates failure silently: a broken local cache or
//! an offline device must degrade the experience, never crash it.

pub mod api;
pub mod connectivity;
pub mod guest_usage;
pub mod presenter;
pub mod storage;

pub use api::{ClientError, RecipeApiClient};
pub use connectivity::{ConnectivityProbe, FixedProbe, HttpProbe};
pub use guest_usage::GuestQuotaStore;
pub use presenter::UsageDisplay;
pub use storage::ClientStorage;
