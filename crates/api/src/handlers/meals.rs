//! Handlers for the read-only meal catalog.

use axum::extract::State;
use axum::Json;

use fame_core::catalog::Meal;
use fame_db::repositories::MealRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/meals
///
/// The full catalog, with nutrition and ingredients.
pub async fn list_meals(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Meal>>>> {
    let rows = MealRepo::list_all(&state.pool).await?;
    let meals = rows
        .into_iter()
        .map(|row| row.into_meal())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DataResponse { data: meals }))
}
