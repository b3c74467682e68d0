// SPDX-License-Identifier: MIT

//! MoodJuice: mood/goal → juice recipe generation with free-tier quotas.
//!
//! This crate provides the generation API server (admission, quota ledger,
//! provider fallback) and the client-side usage caches the app builds on.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::AdmissionService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub admission: AdmissionService,
}
