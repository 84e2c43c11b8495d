//! Route definitions for the weekly meal plan.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::plan;
use crate::state::AppState;

/// Routes mounted at `/plan` (all require auth).
///
/// ```text
/// POST /generate                  -> generate a week from the profile
/// GET  /day?date=                 -> one day with nutrition totals
/// GET  /week?start=               -> seven days for the calendar
/// POST /entries/{id}/reschedule   -> move an entry to another date
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(plan::generate))
        .route("/day", get(plan::day))
        .route("/week", get(plan::week))
        .route("/entries/{id}/reschedule", post(plan::reschedule))
}
