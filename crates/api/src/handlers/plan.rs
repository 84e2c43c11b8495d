//! Handlers for weekly meal plan generation and the calendar views.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use fame_core::catalog::Meal;
use fame_core::error::CoreError;
use fame_core::nutrition::DailySummary;
use fame_core::plan::{build_week_plan, PLAN_DAYS};
use fame_core::types::DbId;
use fame_db::models::profile::UserProfile;
use fame_db::repositories::{MealRepo, PlanRepo, ProfileRepo};
use fame_db::repositories::plan_repo::NewPlanEntry;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /plan/generate`.
#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    /// First day of the week to plan (inclusive).
    pub week_start: NaiveDate,
}

/// Query parameters for `GET /plan/day`.
#[derive(Debug, Deserialize)]
pub struct DayParams {
    pub date: NaiveDate,
}

/// Query parameters for `GET /plan/week`.
#[derive(Debug, Deserialize)]
pub struct WeekParams {
    pub start: NaiveDate,
}

/// Request body for `POST /plan/entries/{id}/reschedule`.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
}

/// One plan entry joined with its catalog meal.
#[derive(Debug, Serialize)]
pub struct PlanEntryView {
    pub entry_id: DbId,
    pub date: NaiveDate,
    pub meal: Meal,
}

/// Response for `GET /plan/day`: the day's meals plus nutrition totals.
#[derive(Debug, Serialize)]
pub struct DayPlanResponse {
    pub date: NaiveDate,
    pub meals: Vec<PlanEntryView>,
    pub summary: DailySummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the caller's profile, or 404 -- plan surfaces require a completed
/// onboarding.
async fn require_profile(state: &AppState, user_id: DbId) -> AppResult<UserProfile> {
    ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: user_id,
            })
        })
}

/// Fetch the catalog meals for a set of plan entries, keyed by meal id.
async fn meals_by_id(state: &AppState, ids: &[DbId]) -> AppResult<HashMap<DbId, Meal>> {
    let rows = MealRepo::find_by_ids(&state.pool, ids).await?;
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        let meal = row.into_meal()?;
        map.insert(meal.id, meal);
    }
    Ok(map)
}

/// End of a seven-day window starting at `start` (exclusive).
fn week_end(start: NaiveDate) -> AppResult<NaiveDate> {
    start
        .checked_add_days(Days::new(PLAN_DAYS))
        .ok_or_else(|| AppError::BadRequest("Date out of range".into()))
}

// ---------------------------------------------------------------------------
// POST /plan/generate
// ---------------------------------------------------------------------------

/// Generate a seven-day plan from the stored profile and replace any
/// existing entries for that week. Deterministic for a given profile,
/// catalog, and week.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<GeneratePlanRequest>,
) -> AppResult<Json<DataResponse<Vec<PlanEntryView>>>> {
    let profile = require_profile(&state, auth.user_id).await?.to_draft();

    let rows = MealRepo::list_all(&state.pool).await?;
    let catalog = rows
        .into_iter()
        .map(|row| row.into_meal())
        .collect::<Result<Vec<_>, _>>()?;

    let planned = build_week_plan(&profile, &catalog, body.week_start);
    let entries: Vec<NewPlanEntry> = planned
        .iter()
        .map(|p| NewPlanEntry {
            plan_date: p.date,
            meal_slot: p.slot.as_str().to_string(),
            meal_id: p.meal_id,
        })
        .collect();

    let end = week_end(body.week_start)?;
    let inserted = PlanRepo::replace_range(&state.pool, auth.user_id, body.week_start, end, &entries)
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        week_start = %body.week_start,
        entries = inserted.len(),
        "Meal plan generated"
    );

    let meal_ids: Vec<DbId> = inserted.iter().map(|e| e.meal_id).collect();
    let meals = meals_by_id(&state, &meal_ids).await?;

    let views = inserted
        .into_iter()
        .filter_map(|entry| {
            meals.get(&entry.meal_id).cloned().map(|meal| PlanEntryView {
                entry_id: entry.id,
                date: entry.plan_date,
                meal,
            })
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// GET /plan/day
// ---------------------------------------------------------------------------

/// The plan for one day, with per-day nutrition totals and the water goal.
pub async fn day(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DayParams>,
) -> AppResult<Json<DataResponse<DayPlanResponse>>> {
    let profile = require_profile(&state, auth.user_id).await?.to_draft();

    let entries = PlanRepo::list_for_date(&state.pool, auth.user_id, params.date).await?;
    let meal_ids: Vec<DbId> = entries.iter().map(|e| e.meal_id).collect();
    let meals = meals_by_id(&state, &meal_ids).await?;

    let views: Vec<PlanEntryView> = entries
        .into_iter()
        .filter_map(|entry| {
            meals.get(&entry.meal_id).cloned().map(|meal| PlanEntryView {
                entry_id: entry.id,
                date: entry.plan_date,
                meal,
            })
        })
        .collect();

    let summary = DailySummary::for_meals(views.iter().map(|v| &v.meal), profile.weight_kg);

    Ok(Json(DataResponse {
        data: DayPlanResponse {
            date: params.date,
            meals: views,
            summary,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /plan/week
// ---------------------------------------------------------------------------

/// All plan entries for the seven days starting at `start`, for the
/// calendar view.
pub async fn week(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<DataResponse<Vec<PlanEntryView>>>> {
    let end = week_end(params.start)?;
    let entries = PlanRepo::list_for_range(&state.pool, auth.user_id, params.start, end).await?;

    let meal_ids: Vec<DbId> = entries.iter().map(|e| e.meal_id).collect();
    let meals = meals_by_id(&state, &meal_ids).await?;

    let views = entries
        .into_iter()
        .filter_map(|entry| {
            meals.get(&entry.meal_id).cloned().map(|meal| PlanEntryView {
                entry_id: entry.id,
                date: entry.plan_date,
                meal,
            })
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// POST /plan/entries/{id}/reschedule
// ---------------------------------------------------------------------------

/// Move a plan entry to another date (drag-and-drop in the calendar). A
/// collision with an existing entry on the target date and slot surfaces
/// as 409.
pub async fn reschedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<DbId>,
    Json(body): Json<RescheduleRequest>,
) -> AppResult<Json<DataResponse<PlanEntryView>>> {
    let entry = PlanRepo::reschedule(&state.pool, auth.user_id, entry_id, body.date)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "PlanEntry",
                id: entry_id,
            })
        })?;

    let meals = meals_by_id(&state, &[entry.meal_id]).await?;
    let meal = meals.get(&entry.meal_id).cloned().ok_or_else(|| {
        AppError::InternalError(format!("Plan entry {} references missing meal", entry.id))
    })?;

    tracing::info!(user_id = auth.user_id, entry_id, date = %body.date, "Plan entry rescheduled");

    Ok(Json(DataResponse {
        data: PlanEntryView {
            entry_id: entry.id,
            date: entry.plan_date,
            meal,
        },
    }))
}
