//! Route definitions for the shopping list.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shopping;
use crate::state::AppState;

/// Routes mounted at `/shopping-list` (all require auth).
///
/// ```text
/// GET  /                    -> current list
/// POST /generate?week_start= -> rebuild from the planned week
/// POST /items/{id}/toggle   -> flip checked state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shopping::list))
        .route("/generate", post(shopping::generate))
        .route("/items/{id}/toggle", post(shopping::toggle_item))
}
