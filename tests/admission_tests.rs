// SPDX-License-Identifier: MIT

//! Admission protocol tests: cap enforcement, degrade policies, and quota
//! reconciliation against scriptable fakes.

use moodjuice::error::AppError;
use moodjuice::models::RecipeRequest;
use moodjuice::time_utils::today_utc;

mod common;
use common::TestDeps;

fn request(user_id: Option<&str>) -> RecipeRequest {
    RecipeRequest {
        user_id: user_id.map(str::to_string),
        mood_id: "tired".to_string(),
        goal_id: "energy".to_string(),
    }
}

#[tokio::test]
async fn test_missing_fields_rejected_before_quota_logic() {
    let deps = TestDeps::new();
    let service = deps.admission();

    let result = service
        .admit(RecipeRequest {
            user_id: Some("u1".to_string()),
            mood_id: String::new(),
            goal_id: "energy".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(deps.provider.call_count(), 0);
    assert_eq!(deps.ledger.increment_calls(), 0);
}

#[tokio::test]
async fn test_guest_gets_recipe_without_server_tracking() {
    let deps = TestDeps::new();
    let service = deps.admission();

    let recipe = service.admit(request(None)).await.unwrap();

    assert_eq!(recipe.name, "Test Blend");
    assert_eq!(recipe.usage.limit, 3);
    assert_eq!(recipe.usage.remaining_today, 3);
    assert!(!recipe.usage.pro);
    assert_eq!(deps.provider.call_count(), 1);
    // Guests never touch the ledger
    assert_eq!(deps.ledger.increment_calls(), 0);
}

#[tokio::test]
async fn test_at_cap_returns_limit_response_without_provider_call() {
    // Scenario B: authenticated non-pro user with currentCount=3, limit=3
    let deps = TestDeps::new();
    deps.ledger.set_count("u1", &today_utc(), 3);
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    assert!(recipe.is_limit_reached);
    assert_eq!(recipe.usage.remaining_today, 0);
    assert_eq!(recipe.name, "Daily Limit Reached");
    assert_eq!(deps.provider.call_count(), 0);
    assert_eq!(deps.ledger.increment_calls(), 0);
}

#[tokio::test]
async fn test_over_cap_also_short_circuits() {
    let deps = TestDeps::new();
    deps.ledger.set_count("u1", &today_utc(), 7);
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    assert!(recipe.is_limit_reached);
    assert_eq!(recipe.usage.remaining_today, 0);
    assert_eq!(deps.provider.call_count(), 0);
}

#[tokio::test]
async fn test_success_increments_and_reports_post_increment_remaining() {
    // remainingToday after a successful call = limit - (currentCount + 1)
    let deps = TestDeps::new();
    deps.ledger.set_count("u1", &today_utc(), 1);
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    assert_eq!(recipe.name, "Test Blend");
    assert!(!recipe.is_limit_reached);
    assert_eq!(recipe.usage.remaining_today, 1);
    assert_eq!(deps.ledger.count("u1", &today_utc()), 2);
    assert_eq!(deps.ledger.increment_calls(), 1);
}

#[tokio::test]
async fn test_fallback_served_response_does_not_consume_quota() {
    let deps = TestDeps::new();
    deps.provider.set_failing(true);
    deps.ledger.set_count("u1", &today_utc(), 1);
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    // Fallback recipe for (tired, energy)
    assert_eq!(recipe.name, "Energizing Green Boost");
    // Pre-attempt remaining, count unchanged
    assert_eq!(recipe.usage.remaining_today, 2);
    assert_eq!(deps.ledger.count("u1", &today_utc()), 1);
    assert_eq!(deps.ledger.increment_calls(), 0);
}

#[tokio::test]
async fn test_pro_user_bypasses_quota_entirely() {
    // Scenario C: pro user with any currentCount always reaches the provider
    let deps = TestDeps {
        subscriptions: std::sync::Arc::new(common::FakeSubscriptions::pro()),
        ..TestDeps::new()
    };
    deps.ledger.set_count("u1", &today_utc(), 99);
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    assert!(recipe.usage.pro);
    assert!(!recipe.is_limit_reached);
    assert_eq!(deps.provider.call_count(), 1);
    // Count never incremented for pro users
    assert_eq!(deps.ledger.increment_calls(), 0);
    assert_eq!(deps.ledger.count("u1", &today_utc()), 99);
}

#[tokio::test]
async fn test_guest_provider_failure_serves_documented_fallback() {
    // Scenario D: provider down, (tired, energy) gets the default entry
    let deps = TestDeps::new();
    deps.provider.set_failing(true);
    let service = deps.admission();

    let recipe = service.admit(request(None)).await.unwrap();

    assert_eq!(recipe.name, "Energizing Green Boost");
    assert_eq!(recipe.emoji, "⚡");
    assert_eq!(recipe.prep_time, 5);
}

#[tokio::test]
async fn test_increment_failure_is_non_fatal_with_pre_increment_estimate() {
    // Scenario E: provider succeeds, increment fails
    let deps = TestDeps::new();
    deps.ledger.set_count("u1", &today_utc(), 1);
    deps.ledger.fail_increments();
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    assert_eq!(recipe.name, "Test Blend");
    // Pre-increment estimate: 3 - 1
    assert_eq!(recipe.usage.remaining_today, 2);
    assert_eq!(deps.ledger.increment_calls(), 1);
}

#[tokio::test]
async fn test_subscription_lookup_failure_fails_open_to_free_tier() {
    let deps = TestDeps {
        subscriptions: std::sync::Arc::new(common::FakeSubscriptions::unavailable()),
        ..TestDeps::new()
    };
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    // Degraded to free tier, but still served and still charged
    assert!(!recipe.usage.pro);
    assert_eq!(recipe.name, "Test Blend");
    assert_eq!(recipe.usage.remaining_today, 2);
    assert_eq!(deps.ledger.count("u1", &today_utc()), 1);
}

#[tokio::test]
async fn test_quota_read_failure_degrades_to_conservative_count() {
    let deps = TestDeps::new();
    deps.ledger.fail_reads();
    deps.ledger.fail_increments();
    let service = deps.admission();

    let recipe = service.admit(request(Some("u1"))).await.unwrap();

    // Conservative count of 1 used → remaining 2, request still served
    assert_eq!(recipe.name, "Test Blend");
    assert_eq!(recipe.usage.remaining_today, 2);
    assert!(!recipe.is_limit_reached);
}

#[tokio::test]
async fn test_charge_lands_even_when_caller_disconnects() {
    use std::sync::Arc;
    use std::time::Duration;

    // A slow ledger widens the window in which the request future can be
    // dropped with the increment still in flight
    let deps = TestDeps::new();
    deps.ledger.delay_increments(Duration::from_millis(50));
    let service = Arc::new(deps.admission());

    let in_flight = tokio::spawn({
        let service = service.clone();
        async move { service.admit(request(Some("u1"))).await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    // Simulates the client disconnecting: the request future is dropped
    in_flight.abort();
    assert!(in_flight.await.is_err());

    // The detached charge still completes
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(deps.ledger.count("u1", &today_utc()), 1);
    assert_eq!(deps.ledger.increment_calls(), 1);
}

#[tokio::test]
async fn test_successive_generations_walk_remaining_to_zero() {
    let deps = TestDeps::new();
    let service = deps.admission();

    let mut remainings = Vec::new();
    for _ in 0..3 {
        let recipe = service.admit(request(Some("u1"))).await.unwrap();
        assert!(!recipe.is_limit_reached);
        remainings.push(recipe.usage.remaining_today);
    }
    assert_eq!(remainings, vec![2, 1, 0]);

    // Fourth attempt is capped without a provider call
    let calls_before = deps.provider.call_count();
    let recipe = service.admit(request(Some("u1"))).await.unwrap();
    assert!(recipe.is_limit_reached);
    assert_eq!(deps.provider.call_count(), calls_before);
}
