pub mod auth;
pub mod health;
pub mod meals;
pub mod onboarding;
pub mod plan;
pub mod profile;
pub mod shopping;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/session                        session gate: user + onboarded flag
///
/// /onboarding                          start wizard (POST), snapshot (GET), abandon (DELETE)
/// /onboarding/draft                    merge a per-step update (PUT)
/// /onboarding/advance                  next step / final save (POST)
/// /onboarding/back                     previous step (POST)
///
/// /profile                             stored profile (GET), direct update (PUT)
///
/// /meals                               meal catalog (GET)
///
/// /plan/generate                       generate a week (POST)
/// /plan/day?date=                      day view with nutrition totals (GET)
/// /plan/week?start=                    week view for the calendar (GET)
/// /plan/entries/{id}/reschedule        move an entry to another date (POST)
///
/// /shopping-list                       current list (GET)
/// /shopping-list/generate              rebuild from the planned week (POST)
/// /shopping-list/items/{id}/toggle     flip checked state (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and the session gate.
        .nest("/auth", auth::router())
        // Onboarding wizard.
        .nest("/onboarding", onboarding::router())
        // Stored profile settings.
        .nest("/profile", profile::router())
        // Meal catalog.
        .nest("/meals", meals::router())
        // Weekly meal plan and calendar.
        .nest("/plan", plan::router())
        // Shopping list.
        .nest("/shopping-list", shopping::router())
}
