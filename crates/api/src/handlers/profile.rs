//! Handlers for the `/profile` resource (direct settings access, outside the
//! wizard).

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use fame_core::error::CoreError;
use fame_core::nutrition::water_goal_liters;
use fame_core::profile::{
    ActivityUpdate, BudgetUpdate, DietaryUpdate, DraftProfile, GoalsUpdate, HydrationUpdate,
    PersonalInfoUpdate, StepUpdate,
};
use fame_core::types::Timestamp;
use fame_db::models::profile::UpsertUserProfile;
use fame_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `GET /profile` and `PUT /profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: DraftProfile,
    pub updated_at: Timestamp,
    /// Daily water goal in liters, derived from body weight.
    pub water_goal_liters: f64,
}

/// GET /api/v1/profile
///
/// The stored profile. 404 until onboarding has completed once.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let row = ProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: auth.user_id,
            })
        })?;

    let profile = row.to_draft();
    let water_goal = water_goal_liters(profile.weight_kg);

    Ok(Json(DataResponse {
        data: ProfileResponse {
            profile,
            updated_at: row.updated_at,
            water_goal_liters: water_goal,
        },
    }))
}

/// PUT /api/v1/profile
///
/// Replace the stored profile with the given values, running them through
/// the same clamping the wizard applies. Idempotent upsert; last write wins.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DraftProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let draft = normalized(input);

    let row = ProfileRepo::upsert(&state.pool, auth.user_id, &UpsertUserProfile::from(&draft))
        .await?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    let profile = row.to_draft();
    let water_goal = water_goal_liters(profile.weight_kg);

    Ok(Json(DataResponse {
        data: ProfileResponse {
            profile,
            updated_at: row.updated_at,
            water_goal_liters: water_goal,
        },
    }))
}

/// Re-apply all step updates over a default draft so direct profile writes
/// get exactly the wizard's clamping and deduplication.
fn normalized(input: DraftProfile) -> DraftProfile {
    let mut draft = DraftProfile::default();
    draft.apply(StepUpdate::PersonalInfo(PersonalInfoUpdate {
        gender: Some(input.gender),
        age: Some(input.age),
        weight_kg: Some(input.weight_kg),
        height_cm: Some(input.height_cm),
    }));
    draft.apply(StepUpdate::Activity(ActivityUpdate {
        sport_type: Some(input.sport_type),
        sport_frequency: Some(input.sport_frequency),
    }));
    draft.apply(StepUpdate::Dietary(DietaryUpdate {
        allergies: Some(input.allergies),
        meals: Some(input.meals),
    }));
    draft.apply(StepUpdate::Goals(GoalsUpdate {
        goal: Some(input.goal),
        family_members: Some(input.family_members),
    }));
    draft.apply(StepUpdate::Budget(BudgetUpdate {
        monthly_budget: Some(input.monthly_budget),
    }));
    draft.apply(StepUpdate::Hydration(HydrationUpdate {
        water_reminders: Some(input.water_reminders),
        reminder_interval_hours: Some(input.reminder_interval_hours),
    }));
    draft
}
