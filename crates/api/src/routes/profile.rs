//! Route definitions for the `/profile` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile` (all require auth).
///
/// ```text
/// GET /  -> stored profile with derived water goal
/// PUT /  -> replace the stored profile (idempotent upsert)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profile::get_profile).put(profile::update_profile))
}
