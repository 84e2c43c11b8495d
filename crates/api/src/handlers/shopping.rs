//! Handlers for the shopping list.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use fame_core::catalog::Meal;
use fame_core::error::CoreError;
use fame_core::plan::PLAN_DAYS;
use fame_core::shopping::aggregate_ingredients;
use fame_core::types::DbId;
use fame_db::models::shopping::ShoppingItem;
use fame_db::repositories::{MealRepo, PlanRepo, ProfileRepo, ShoppingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `POST /shopping-list/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateListParams {
    /// First day of the planned week to aggregate (inclusive).
    pub week_start: NaiveDate,
}

/// Response for `GET /shopping-list`: the items plus derived totals.
#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    /// Sorted by category then name.
    pub items: Vec<ShoppingItem>,
    pub total_items: usize,
    pub checked_count: usize,
    /// Sum of estimated prices over the lines that have one.
    pub estimated_total: f64,
}

impl ShoppingListResponse {
    fn of(items: Vec<ShoppingItem>) -> Self {
        let checked_count = items.iter().filter(|item| item.checked).count();
        let estimated_total = items
            .iter()
            .filter_map(|item| item.estimated_price)
            .sum();
        Self {
            total_items: items.len(),
            checked_count,
            estimated_total,
            items,
        }
    }
}

/// GET /api/v1/shopping-list
///
/// The current list with item and price totals.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ShoppingListResponse>>> {
    let items = ShoppingRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: ShoppingListResponse::of(items),
    }))
}

/// POST /api/v1/shopping-list/generate
///
/// Rebuild the list from the planned week's ingredients, scaled by household
/// size. Replaces the existing list; checked state does not carry over.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<GenerateListParams>,
) -> AppResult<Json<DataResponse<Vec<ShoppingItem>>>> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: auth.user_id,
            })
        })?
        .to_draft();

    let end = params
        .week_start
        .checked_add_days(Days::new(PLAN_DAYS))
        .ok_or_else(|| AppError::BadRequest("Date out of range".into()))?;

    let entries =
        PlanRepo::list_for_range(&state.pool, auth.user_id, params.week_start, end).await?;
    if entries.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No meal plan for that week; generate a plan first".into(),
        )));
    }

    let meal_ids: Vec<DbId> = entries.iter().map(|e| e.meal_id).collect();
    let rows = MealRepo::find_by_ids(&state.pool, &meal_ids).await?;
    let mut catalog: HashMap<DbId, Meal> = HashMap::with_capacity(rows.len());
    for row in rows {
        let meal = row.into_meal()?;
        catalog.insert(meal.id, meal);
    }

    // One catalog meal planned twice contributes its ingredients twice.
    let week_meals: Vec<&Meal> = entries
        .iter()
        .filter_map(|entry| catalog.get(&entry.meal_id))
        .collect();

    let drafts = aggregate_ingredients(week_meals.into_iter(), profile.family_members);
    let items = ShoppingRepo::replace_for_user(&state.pool, auth.user_id, &drafts).await?;

    tracing::info!(
        user_id = auth.user_id,
        week_start = %params.week_start,
        items = items.len(),
        "Shopping list generated"
    );

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/shopping-list/items/{id}/toggle
///
/// Flip an item's checked state.
pub async fn toggle_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShoppingItem>>> {
    let item = ShoppingRepo::toggle_checked(&state.pool, auth.user_id, item_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ShoppingItem",
                id: item_id,
            })
        })?;

    Ok(Json(DataResponse { data: item }))
}
