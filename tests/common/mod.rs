// SPDX-License-Identifier: MIT

//! Shared test fixtures: scriptable fakes for the admission service's
//! dependencies and an app factory wired with them.

use async_trait::async_trait;
use moodjuice::config::Config;
use moodjuice::db::FirestoreDb;
use moodjuice::error::AppError;
use moodjuice::models::RecipeContent;
use moodjuice::services::{AdmissionService, RecipeProvider, SubscriptionLookup, UsageLedger};
use moodjuice::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Provider fake with a call counter and a failure switch.
#[derive(Default)]
pub struct FakeProvider {
    calls: AtomicUsize,
    fail: AtomicBool,
}

#[allow(dead_code)]
impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let provider = Self::default();
        provider.fail.store(true, Ordering::SeqCst);
        provider
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    async fn generate(&self, _mood_id: &str, _goal_id: &str) -> Result<RecipeContent, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Provider("provider unavailable".to_string()));
        }
        // Minimal valid payload; serde fills the rest with safe defaults
        Ok(serde_json::from_str(r#"{"name": "Test Blend"}"#).unwrap())
    }
}

/// In-memory usage ledger keyed by `(user, day)`, with independent failure
/// switches for reads and increments.
#[derive(Default)]
pub struct FakeLedger {
    counts: Mutex<HashMap<String, u32>>,
    fail_reads: AtomicBool,
    fail_increments: AtomicBool,
    increment_calls: AtomicUsize,
    increment_delay_ms: AtomicUsize,
}

#[allow(dead_code)]
impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(user_id: &str, day: &str, count: u32) -> Self {
        let ledger = Self::default();
        ledger.set_count(user_id, day, count);
        ledger
    }

    fn key(user_id: &str, day: &str) -> String {
        format!("{}_{}", user_id, day)
    }

    pub fn set_count(&self, user_id: &str, day: &str, count: u32) {
        self.counts
            .lock()
            .unwrap()
            .insert(Self::key(user_id, day), count);
    }

    pub fn count(&self, user_id: &str, day: &str) -> u32 {
        self.counts
            .lock()
            .unwrap()
            .get(&Self::key(user_id, day))
            .copied()
            .unwrap_or(0)
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_increments(&self) {
        self.fail_increments.store(true, Ordering::SeqCst);
    }

    pub fn increment_calls(&self) -> usize {
        self.increment_calls.load(Ordering::SeqCst)
    }

    /// Make each increment sleep first, to widen the window between the
    /// request future and the charge landing.
    pub fn delay_increments(&self, delay: Duration) {
        self.increment_delay_ms
            .store(delay.as_millis() as usize, Ordering::SeqCst);
    }
}

#[async_trait]
impl UsageLedger for FakeLedger {
    async fn daily_count(&self, user_id: &str, day: &str) -> Result<u32, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Database("ledger read failed".to_string()));
        }
        Ok(self.count(user_id, day))
    }

    async fn increment_daily(&self, user_id: &str, day: &str) -> Result<u32, AppError> {
        let delay = self.increment_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        self.increment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_increments.load(Ordering::SeqCst) {
            return Err(AppError::Database("ledger increment failed".to_string()));
        }
        let mut counts = self.counts.lock().unwrap();
        let entry = counts.entry(Self::key(user_id, day)).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }
}

/// Subscription lookup fake.
pub struct FakeSubscriptions {
    active: bool,
    fail: bool,
}

#[allow(dead_code)]
impl FakeSubscriptions {
    pub fn free() -> Self {
        Self {
            active: false,
            fail: false,
        }
    }

    pub fn pro() -> Self {
        Self {
            active: true,
            fail: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            active: false,
            fail: true,
        }
    }
}

#[async_trait]
impl SubscriptionLookup for FakeSubscriptions {
    async fn is_active(&self, _user_id: &str) -> Result<bool, AppError> {
        if self.fail {
            return Err(AppError::Database("subscription lookup failed".to_string()));
        }
        Ok(self.active)
    }
}

/// Everything a test needs to script and observe the admission flow.
pub struct TestDeps {
    pub provider: Arc<FakeProvider>,
    pub ledger: Arc<FakeLedger>,
    pub subscriptions: Arc<FakeSubscriptions>,
}

#[allow(dead_code)]
impl TestDeps {
    pub fn new() -> Self {
        Self {
            provider: Arc::new(FakeProvider::new()),
            ledger: Arc::new(FakeLedger::new()),
            subscriptions: Arc::new(FakeSubscriptions::free()),
        }
    }

    pub fn admission(&self) -> AdmissionService {
        AdmissionService::new(
            self.subscriptions.clone(),
            self.ledger.clone(),
            self.provider.clone(),
            3,
            Duration::from_millis(200),
        )
    }
}

/// Create a test app over the fakes. The Firestore handle is the offline
/// mock, so anything that reaches it gets a database error.
#[allow(dead_code)]
pub fn create_test_app(deps: &TestDeps) -> axum::Router {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: FirestoreDb::new_mock(),
        admission: deps.admission(),
    });
    moodjuice::routes::create_router(state)
}
