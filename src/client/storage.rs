// SPDX-License-Identifier: MIT

//! Safe key-value storage for client-side state.
//!
//! A single JSON file holding string-keyed entries (day-scoped guest usage,
//! the onboarding flag). Reads of a missing or corrupt file yield nothing
//! and writes that fail are logged and swallowed: local state is advisory
//! and must never take the app down.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

const ONBOARDING_KEY: &str = "onboardingComplete";

/// File-backed key-value store.
pub struct ClientStorage {
    path: PathBuf,
}

impl ClientStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> BTreeMap<String, Value> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) {
        let result = serde_json::to_vec_pretty(map)
            .map_err(|e| e.to_string())
            .and_then(|bytes| std::fs::write(&self.path, bytes).map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist client storage");
        }
    }

    /// Get a typed value, or `None` if absent or undecodable.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_map()
            .remove(key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Set a value. Failures are absorbed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        let mut map = self.read_map();
        map.insert(key.to_string(), value);
        self.write_map(&map);
    }

    /// Remove a key if present.
    pub fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }

    // ─── Onboarding Flag ─────────────────────────────────────────

    pub fn is_onboarding_complete(&self) -> bool {
        self.get::<bool>(ONBOARDING_KEY).unwrap_or(false)
    }

    pub fn set_onboarding_complete(&self) {
        self.set(ONBOARDING_KEY, &true);
    }
}
