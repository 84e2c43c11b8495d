//! Handlers for the onboarding wizard.
//!
//! Each user gets at most one in-memory [`WizardController`]; the draft lives
//! there until the final advance persists it. Overlapping mutating requests
//! are rejected with 409 while a load or save is in flight, and a failed
//! final save surfaces as 503 with the wizard left on its last step so the
//! client can retry.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use fame_core::error::CoreError;
use fame_core::profile::{DraftProfile, StepUpdate};
use fame_core::wizard::{
    AdvanceOutcome, PrefillOutcome, WizardController, WizardStep, TOTAL_STEPS,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::store::PgProfileStore;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /onboarding`.
#[derive(Debug, Default, Deserialize)]
pub struct StartWizardRequest {
    /// Seed the draft from the stored profile (edit mode) instead of
    /// starting from defaults.
    #[serde(default)]
    pub edit: bool,
}

/// Point-in-time view of a wizard controller.
#[derive(Debug, Serialize)]
pub struct WizardSnapshot {
    /// 0-based index of the current step; absent once the wizard is done.
    pub step_index: Option<usize>,
    pub step: Option<WizardStep>,
    pub step_label: Option<&'static str>,
    pub total_steps: usize,
    pub progress: f64,
    pub done: bool,
    pub draft: DraftProfile,
}

impl WizardSnapshot {
    fn of(wizard: &WizardController) -> Self {
        let step = wizard.current_step();
        Self {
            step_index: step.map(WizardStep::index),
            step,
            step_label: step.map(WizardStep::label),
            total_steps: TOTAL_STEPS,
            progress: wizard.progress(),
            done: wizard.is_done(),
            draft: wizard.draft().clone(),
        }
    }
}

/// Response for `POST /onboarding`.
#[derive(Debug, Serialize)]
pub struct StartWizardResponse {
    pub wizard: WizardSnapshot,
    /// How the draft was seeded; present only in edit mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<PrefillOutcome>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch the caller's wizard controller, or 404 if none exists.
async fn wizard_for(
    state: &AppState,
    user_id: fame_core::types::DbId,
) -> AppResult<Arc<Mutex<WizardController>>> {
    state
        .wizards
        .lock()
        .await
        .get(&user_id)
        .cloned()
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "OnboardingWizard",
                id: user_id,
            })
        })
}

/// The 409 returned when an overlapping mutating request hits an in-flight
/// load or save.
fn busy_error() -> AppError {
    AppError::Core(CoreError::Conflict(
        "A wizard operation is already in flight".into(),
    ))
}

// ---------------------------------------------------------------------------
// POST /onboarding
// ---------------------------------------------------------------------------

/// Start (or restart) the onboarding wizard for the authenticated user.
///
/// With `edit: true` the draft is seeded from the stored profile; a missing
/// profile keeps the defaults, and an unreachable store is reported as a
/// distinct prefill outcome while still letting the wizard open.
pub async fn start(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<StartWizardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StartWizardResponse>>)> {
    // Never replace a controller mid-save.
    if let Some(existing) = state.wizards.lock().await.get(&auth.user_id) {
        if existing.try_lock().is_err() {
            return Err(busy_error());
        }
    }

    let (wizard, prefill) = if body.edit {
        let store = PgProfileStore::new(state.pool.clone());
        let (wizard, outcome) = WizardController::load_for_edit(auth.user_id, &store).await;
        (wizard, Some(outcome))
    } else {
        (WizardController::new(auth.user_id), None)
    };

    let snapshot = WizardSnapshot::of(&wizard);
    state
        .wizards
        .lock()
        .await
        .insert(auth.user_id, Arc::new(Mutex::new(wizard)));

    tracing::info!(user_id = auth.user_id, edit = body.edit, "Onboarding wizard started");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StartWizardResponse {
                wizard: snapshot,
                prefill,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /onboarding
// ---------------------------------------------------------------------------

/// Current wizard snapshot for the authenticated user.
pub async fn snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<WizardSnapshot>>> {
    let controller = wizard_for(&state, auth.user_id).await?;
    let wizard = controller.lock().await;
    Ok(Json(DataResponse {
        data: WizardSnapshot::of(&wizard),
    }))
}

// ---------------------------------------------------------------------------
// PUT /onboarding/draft
// ---------------------------------------------------------------------------

/// Merge a per-step partial update into the draft.
///
/// The tagged body keeps each step's writable fields disjoint. Values are
/// clamped, never rejected.
pub async fn update_draft(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<StepUpdate>,
) -> AppResult<Json<DataResponse<WizardSnapshot>>> {
    let controller = wizard_for(&state, auth.user_id).await?;
    let mut wizard = controller.try_lock().map_err(|_| busy_error())?;

    if !wizard.update_draft(update) {
        return Err(AppError::Core(CoreError::Conflict(
            "The wizard has already completed".into(),
        )));
    }

    Ok(Json(DataResponse {
        data: WizardSnapshot::of(&wizard),
    }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/advance
// ---------------------------------------------------------------------------

/// Advance one step; from the last step this persists the draft and
/// completes the wizard.
pub async fn advance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<WizardSnapshot>>> {
    let controller = wizard_for(&state, auth.user_id).await?;
    let mut wizard = controller.try_lock().map_err(|_| busy_error())?;

    let store = PgProfileStore::new(state.pool.clone());
    match wizard.go_next(&store).await {
        AdvanceOutcome::Moved(_) => Ok(Json(DataResponse {
            data: WizardSnapshot::of(&wizard),
        })),
        AdvanceOutcome::Completed => {
            let snapshot = WizardSnapshot::of(&wizard);
            drop(wizard);
            // Completed controllers are dropped from the registry; the
            // persisted profile is the source of truth from here on.
            state.wizards.lock().await.remove(&auth.user_id);
            Ok(Json(DataResponse { data: snapshot }))
        }
        AdvanceOutcome::SaveFailed(err) => {
            Err(AppError::Core(CoreError::Unavailable(err.to_string())))
        }
        AdvanceOutcome::Busy => Err(busy_error()),
        AdvanceOutcome::AlreadyDone => Err(AppError::Core(CoreError::Conflict(
            "The wizard has already completed".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// POST /onboarding/back
// ---------------------------------------------------------------------------

/// Retreat one step. Rejected on the first step.
pub async fn back(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<WizardSnapshot>>> {
    let controller = wizard_for(&state, auth.user_id).await?;
    let mut wizard = controller.try_lock().map_err(|_| busy_error())?;

    if !wizard.go_previous() {
        return Err(AppError::Core(CoreError::Validation(
            "Already on the first step; cannot go back".into(),
        )));
    }

    Ok(Json(DataResponse {
        data: WizardSnapshot::of(&wizard),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /onboarding
// ---------------------------------------------------------------------------

/// Abandon the wizard, discarding the in-memory draft. Nothing was
/// persisted, so there is nothing to roll back.
pub async fn abandon(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let mut wizards = state.wizards.lock().await;
    match wizards.get(&auth.user_id) {
        Some(existing) if existing.try_lock().is_err() => Err(busy_error()),
        Some(_) => {
            wizards.remove(&auth.user_id);
            tracing::info!(user_id = auth.user_id, "Onboarding wizard abandoned");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "OnboardingWizard",
            id: auth.user_id,
        })),
    }
}
