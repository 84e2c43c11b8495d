//! Route definitions for the meal catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::meals;
use crate::state::AppState;

/// Routes mounted at `/meals` (require auth).
///
/// ```text
/// GET /  -> full catalog
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(meals::list_meals))
}
