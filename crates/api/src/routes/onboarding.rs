//! Route definitions for the onboarding wizard.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding` (all require auth).
///
/// ```text
/// POST   /          -> start (or restart) the wizard
/// GET    /          -> current snapshot
/// DELETE /          -> abandon, discarding the draft
/// PUT    /draft     -> merge a per-step update
/// POST   /advance   -> next step / final save
/// POST   /back      -> previous step
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(onboarding::start)
                .get(onboarding::snapshot)
                .delete(onboarding::abandon),
        )
        .route("/draft", put(onboarding::update_draft))
        .route("/advance", post(onboarding::advance))
        .route("/back", post(onboarding::back))
}
