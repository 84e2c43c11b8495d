//! The onboarding wizard state machine.
//!
//! A [`WizardController`] drives one user through the fixed, ordered step
//! list, exclusively owning the in-progress [`DraftProfile`] for the life of
//! the session. Navigation is synchronous; the only suspension points are the
//! profile loads and the single save performed when advancing past the final
//! step. Construct a fresh controller per onboarding session — there is no
//! shared instance.

use async_trait::async_trait;
use serde::Serialize;

use crate::profile::{DraftProfile, StepUpdate};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Step registry
// ---------------------------------------------------------------------------

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: usize = 6;

/// The six steps of the onboarding wizard, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    Activity,
    Dietary,
    Goals,
    Budget,
    Hydration,
}

/// All steps in wizard order.
pub const ALL_STEPS: [WizardStep; TOTAL_STEPS] = [
    WizardStep::PersonalInfo,
    WizardStep::Activity,
    WizardStep::Dietary,
    WizardStep::Goals,
    WizardStep::Budget,
    WizardStep::Hydration,
];

impl WizardStep {
    /// Convert a 0-based index to a step.
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_STEPS.get(index).copied()
    }

    /// 0-based position of this step in the wizard order.
    pub fn index(self) -> usize {
        match self {
            Self::PersonalInfo => 0,
            Self::Activity => 1,
            Self::Dietary => 2,
            Self::Goals => 3,
            Self::Budget => 4,
            Self::Hydration => 5,
        }
    }

    /// Human-readable step title.
    pub fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::Activity => "Sport Activity",
            Self::Dietary => "Dietary Preferences",
            Self::Goals => "Goals & Family",
            Self::Budget => "Food Budget",
            Self::Hydration => "Water Reminders",
        }
    }

    /// The step whose field slice a given update writes.
    pub fn for_update(update: &StepUpdate) -> Self {
        match update {
            StepUpdate::PersonalInfo(_) => Self::PersonalInfo,
            StepUpdate::Activity(_) => Self::Activity,
            StepUpdate::Dietary(_) => Self::Dietary,
            StepUpdate::Goals(_) => Self::Goals,
            StepUpdate::Budget(_) => Self::Budget,
            StepUpdate::Hydration(_) => Self::Hydration,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile store seam
// ---------------------------------------------------------------------------

/// Error from the persistence adapter, opaque to the state machine.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Persistence seam for the wizard: load at most one profile per user and
/// save via idempotent upsert.
///
/// `load` is deliberately three-way: `Ok(Some)` is a found profile,
/// `Ok(None)` is genuine absence (a new user), and `Err` is an unreachable
/// store — callers must not conflate the last two.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, user_id: DbId) -> Result<Option<DraftProfile>, StoreError>;
    async fn save(&self, user_id: DbId, draft: &DraftProfile) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Controller state
// ---------------------------------------------------------------------------

/// Lifecycle state of a wizard controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Pre-filling the draft for edit mode.
    Loading,
    /// On step `i` (0-based).
    Step(usize),
    /// The final save is in flight.
    Saving,
    /// Completed; the controller's lifecycle ends here.
    Done,
}

/// How the draft was seeded when starting in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefillOutcome {
    /// An existing profile seeded the draft.
    Loaded,
    /// No profile exists; defaults kept.
    Defaults,
    /// The store was unreachable; defaults kept, but the caller can tell
    /// this apart from genuine absence.
    LoadFailed,
}

/// Result of a `go_next` call.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// Moved forward to the given 0-based step index.
    Moved(usize),
    /// The final save succeeded; the wizard is done. Emitted exactly once
    /// per controller — this is the completion signal.
    Completed,
    /// The final save failed; the step index and draft are unchanged so the
    /// user may retry by advancing again.
    SaveFailed(StoreError),
    /// Rejected: a load or save is already in flight.
    Busy,
    /// Rejected: the wizard already completed.
    AlreadyDone,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives one user through the onboarding steps and finalizes by persisting.
#[derive(Debug)]
pub struct WizardController {
    user_id: DbId,
    state: WizardState,
    draft: DraftProfile,
}

impl WizardController {
    /// Start a fresh wizard at step 0 with a fully defaulted draft.
    pub fn new(user_id: DbId) -> Self {
        Self {
            user_id,
            state: WizardState::Step(0),
            draft: DraftProfile::default(),
        }
    }

    /// Start a wizard in edit mode, seeding the draft from the store.
    ///
    /// `NotFound` keeps the defaults; a store error is logged and the wizard
    /// proceeds with defaults, but the distinct outcome is reported so the
    /// embedding surface can tell a new user from an unreachable store.
    pub async fn load_for_edit(user_id: DbId, store: &dyn ProfileStore) -> (Self, PrefillOutcome) {
        let mut controller = Self {
            user_id,
            state: WizardState::Loading,
            draft: DraftProfile::default(),
        };

        let outcome = match store.load(user_id).await {
            Ok(Some(existing)) => {
                controller.draft = existing;
                PrefillOutcome::Loaded
            }
            Ok(None) => PrefillOutcome::Defaults,
            Err(err) => {
                tracing::warn!(user_id, error = %err, "Profile prefill failed; using defaults");
                PrefillOutcome::LoadFailed
            }
        };

        controller.state = WizardState::Step(0);
        (controller, outcome)
    }

    pub fn user_id(&self) -> DbId {
        self.user_id
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// The current step, when the wizard is on one.
    pub fn current_step(&self) -> Option<WizardStep> {
        match self.state {
            WizardState::Step(i) => WizardStep::from_index(i),
            _ => None,
        }
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    /// True while a load or save is in flight; navigation and draft updates
    /// are rejected in this window (double-submit guard).
    pub fn busy(&self) -> bool {
        matches!(self.state, WizardState::Loading | WizardState::Saving)
    }

    pub fn is_done(&self) -> bool {
        self.state == WizardState::Done
    }

    /// Completion fraction in (0, 1], derived from the step index.
    pub fn progress(&self) -> f64 {
        match self.state {
            WizardState::Loading => 0.0,
            WizardState::Step(i) => (i + 1) as f64 / TOTAL_STEPS as f64,
            WizardState::Saving | WizardState::Done => 1.0,
        }
    }

    /// Merge a per-step partial into the draft. Never validates: any
    /// in-range or out-of-range value is accepted (clamped by the draft).
    /// Returns `false` only when the controller is busy or done.
    pub fn update_draft(&mut self, update: StepUpdate) -> bool {
        if self.busy() || self.is_done() {
            return false;
        }
        self.draft.apply(update);
        true
    }

    /// Advance one step, or — from the last step — persist the draft and
    /// complete. The save is the only suspension point; the controller is
    /// busy for its duration.
    pub async fn go_next(&mut self, store: &dyn ProfileStore) -> AdvanceOutcome {
        match self.state {
            WizardState::Loading | WizardState::Saving => AdvanceOutcome::Busy,
            WizardState::Done => AdvanceOutcome::AlreadyDone,
            WizardState::Step(i) if i + 1 < TOTAL_STEPS => {
                self.state = WizardState::Step(i + 1);
                AdvanceOutcome::Moved(i + 1)
            }
            WizardState::Step(last) => {
                self.state = WizardState::Saving;
                match store.save(self.user_id, &self.draft).await {
                    Ok(()) => {
                        self.state = WizardState::Done;
                        tracing::info!(user_id = self.user_id, "Onboarding wizard completed");
                        AdvanceOutcome::Completed
                    }
                    Err(err) => {
                        // No partial commit: restore the pre-save state so a
                        // retry re-issues exactly one more save.
                        self.state = WizardState::Step(last);
                        tracing::warn!(user_id = self.user_id, error = %err, "Profile save failed");
                        AdvanceOutcome::SaveFailed(err)
                    }
                }
            }
        }
    }

    /// Retreat one step. No-op at step 0, while busy, and after completion.
    /// Returns whether the call was accepted.
    pub fn go_previous(&mut self) -> bool {
        match self.state {
            WizardState::Step(i) if i > 0 => {
                self.state = WizardState::Step(i - 1);
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
