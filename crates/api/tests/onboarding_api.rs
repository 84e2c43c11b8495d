//! Integration tests for the onboarding wizard endpoints: the full
//! first-run flow, edit mode, and the conflict guards.
//!
//! Wizard state is held in memory inside `AppState`, so each test builds the
//! app once and clones the router per request.

mod common;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::Router;
use common::{expect_json, request_with_auth, seed_user};
use serde_json::json;
use sqlx::PgPool;

use fame_db::repositories::ProfileRepo;

async fn start_wizard(app: &Router, token: &str, edit: bool) -> serde_json::Value {
    let response = request_with_auth(
        app.clone(),
        "POST",
        "/api/v1/onboarding",
        token,
        Some(json!({ "edit": edit })),
    )
    .await;
    expect_json(response, StatusCode::CREATED).await
}

async fn put_draft(app: &Router, token: &str, body: serde_json::Value) -> Response<Body> {
    request_with_auth(
        app.clone(),
        "PUT",
        "/api/v1/onboarding/draft",
        token,
        Some(body),
    )
    .await
}

async fn advance(app: &Router, token: &str) -> Response<Body> {
    request_with_auth(app.clone(), "POST", "/api/v1/onboarding/advance", token, None).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn fresh_wizard_starts_at_step_zero_with_defaults(pool: PgPool) {
    let (_, token) = seed_user(&pool, "wizard@example.com").await;
    let app = common::build_test_app(pool);

    let json = start_wizard(&app, &token, false).await;
    let wizard = &json["data"]["wizard"];
    assert_eq!(wizard["step_index"], 0);
    assert_eq!(wizard["total_steps"], 6);
    assert_eq!(wizard["done"], false);
    // Documented defaults.
    assert_eq!(wizard["draft"]["age"], 25);
    assert_eq!(wizard["draft"]["weight_kg"], 70.0);
    assert_eq!(wizard["draft"]["family_members"], 1);
    assert_eq!(wizard["draft"]["monthly_budget"], 300.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn full_run_persists_profile_and_flips_session_gate(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "complete@example.com").await;
    let app = common::build_test_app(pool.clone());

    start_wizard(&app, &token, false).await;

    // Fill a couple of steps.
    let response = put_draft(
        &app,
        &token,
        json!({
            "step": "personal_info",
            "fields": { "gender": "female", "age": 30 },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_draft(
        &app,
        &token,
        json!({
            "step": "budget",
            "fields": { "monthly_budget": 450.0 },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Advance through all six steps; the last advance persists.
    for _ in 0..5 {
        let response = advance(&app, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = advance(&app, &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["done"], true);
    assert_eq!(json["data"]["progress"], 1.0);

    // Exactly one profile row, carrying the merged draft.
    let row = ProfileRepo::find_by_user(&pool, user_id)
        .await
        .expect("query should succeed")
        .expect("profile row should exist");
    assert_eq!(row.gender, "female");
    assert_eq!(row.age, 30);
    assert_eq!(row.monthly_budget, 450.0);
    // Untouched fields persisted at their defaults.
    assert_eq!(row.weight_kg, 70.0);

    // The session gate now reports onboarded.
    let response =
        request_with_auth(app.clone(), "GET", "/api/v1/auth/session", &token, None).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["onboarded"], true);

    // The controller is gone; a further advance is 404, not a replay.
    let response = advance(&app, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_values_are_clamped_not_rejected(pool: PgPool) {
    let (_, token) = seed_user(&pool, "clamp@example.com").await;
    let app = common::build_test_app(pool);

    start_wizard(&app, &token, false).await;

    let response = put_draft(
        &app,
        &token,
        json!({
            "step": "personal_info",
            "fields": { "age": 900, "weight_kg": 1.0 },
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["draft"]["age"], 100);
    assert_eq!(json["data"]["draft"]["weight_kg"], 30.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn back_on_first_step_is_rejected(pool: PgPool) {
    let (_, token) = seed_user(&pool, "back@example.com").await;
    let app = common::build_test_app(pool);

    start_wizard(&app, &token, false).await;

    let response =
        request_with_auth(app.clone(), "POST", "/api/v1/onboarding/back", &token, None).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn navigation_round_trip_preserves_draft(pool: PgPool) {
    let (_, token) = seed_user(&pool, "nav@example.com").await;
    let app = common::build_test_app(pool);

    start_wizard(&app, &token, false).await;

    let response = put_draft(
        &app,
        &token,
        json!({
            "step": "activity",
            "fields": { "sport_type": "running", "sport_frequency": 5 },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Forward two steps, back one.
    advance(&app, &token).await;
    advance(&app, &token).await;
    let response =
        request_with_auth(app.clone(), "POST", "/api/v1/onboarding/back", &token, None).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["step_index"], 1);
    assert_eq!(json["data"]["draft"]["sport_type"], "running");
    assert_eq!(json["data"]["draft"]["sport_frequency"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn abandon_discards_draft_without_persisting(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "abandon@example.com").await;
    let app = common::build_test_app(pool.clone());

    start_wizard(&app, &token, false).await;

    let response = request_with_auth(app.clone(), "DELETE", "/api/v1/onboarding", &token, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Nothing was written.
    let exists = ProfileRepo::exists(&pool, user_id)
        .await
        .expect("query should succeed");
    assert!(!exists);

    // The wizard is gone.
    let response = request_with_auth(app.clone(), "GET", "/api/v1/onboarding", &token, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_mode_prefills_from_stored_profile(pool: PgPool) {
    let (_, token) = seed_user(&pool, "edit@example.com").await;
    let app = common::build_test_app(pool);

    // First run: complete with a distinctive budget.
    start_wizard(&app, &token, false).await;
    let response = put_draft(
        &app,
        &token,
        json!({
            "step": "budget",
            "fields": { "monthly_budget": 777.0 },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    for _ in 0..6 {
        advance(&app, &token).await;
    }

    // Second run in edit mode: the draft is seeded from the saved profile.
    let json = start_wizard(&app, &token, true).await;
    assert_eq!(json["data"]["prefill"], "loaded");
    assert_eq!(json["data"]["wizard"]["draft"]["monthly_budget"], 777.0);
    assert_eq!(json["data"]["wizard"]["step_index"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_mode_for_new_user_keeps_defaults(pool: PgPool) {
    let (_, token) = seed_user(&pool, "edit-new@example.com").await;
    let app = common::build_test_app(pool);

    let json = start_wizard(&app, &token, true).await;
    assert_eq!(json["data"]["prefill"], "defaults");
    assert_eq!(json["data"]["wizard"]["draft"]["monthly_budget"], 300.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rerunning_onboarding_updates_in_place(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "rerun@example.com").await;
    let app = common::build_test_app(pool.clone());

    // Complete once.
    start_wizard(&app, &token, false).await;
    for _ in 0..6 {
        advance(&app, &token).await;
    }

    // Complete again with a different age.
    start_wizard(&app, &token, false).await;
    let response = put_draft(
        &app,
        &token,
        json!({
            "step": "personal_info",
            "fields": { "age": 40 },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    for _ in 0..6 {
        advance(&app, &token).await;
    }

    // Still exactly one row, updated in place.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(count.0, 1);

    let row = ProfileRepo::find_by_user(&pool, user_id)
        .await
        .expect("query should succeed")
        .expect("profile row should exist");
    assert_eq!(row.age, 40);
}
