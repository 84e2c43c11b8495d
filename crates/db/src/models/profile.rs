//! Persisted user profile row and its mapping to the domain draft shape.

use serde::Serialize;
use sqlx::FromRow;

use fame_core::profile::{DraftProfile, Gender, Goal, MealSlot, SportType};
use fame_core::types::{DbId, Timestamp};

/// A row from the `user_profiles` table. One row per user, created on first
/// wizard completion and replaced in place thereafter (no history).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub gender: String,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sport_type: String,
    pub sport_frequency: i32,
    pub allergies: Vec<String>,
    pub goal: String,
    pub meals: Vec<String>,
    pub family_members: i32,
    pub monthly_budget: f64,
    pub water_reminders: bool,
    pub reminder_interval_hours: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserProfile {
    /// Map the row into the domain aggregate.
    ///
    /// Enum strings are parsed leniently: unknown values degrade to the
    /// unset defaults instead of failing the load, and unknown meal slots
    /// are dropped.
    pub fn to_draft(&self) -> DraftProfile {
        DraftProfile {
            gender: Gender::from_str_lenient(&self.gender),
            age: self.age,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            sport_type: SportType::from_str_lenient(&self.sport_type),
            sport_frequency: self.sport_frequency,
            allergies: self.allergies.clone(),
            meals: self
                .meals
                .iter()
                .filter_map(|slot| MealSlot::from_str_opt(slot))
                .collect(),
            goal: Goal::from_str_lenient(&self.goal),
            family_members: self.family_members,
            monthly_budget: self.monthly_budget,
            water_reminders: self.water_reminders,
            reminder_interval_hours: self.reminder_interval_hours,
        }
    }
}

/// Bind-ready upsert payload derived from a domain draft.
#[derive(Debug, Clone)]
pub struct UpsertUserProfile {
    pub gender: String,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sport_type: String,
    pub sport_frequency: i32,
    pub allergies: Vec<String>,
    pub goal: String,
    pub meals: Vec<String>,
    pub family_members: i32,
    pub monthly_budget: f64,
    pub water_reminders: bool,
    pub reminder_interval_hours: i32,
}

impl From<&DraftProfile> for UpsertUserProfile {
    fn from(draft: &DraftProfile) -> Self {
        Self {
            gender: draft.gender.as_str().to_string(),
            age: draft.age,
            weight_kg: draft.weight_kg,
            height_cm: draft.height_cm,
            sport_type: draft.sport_type.as_str().to_string(),
            sport_frequency: draft.sport_frequency,
            allergies: draft.allergies.clone(),
            goal: draft.goal.as_str().to_string(),
            meals: draft.meals.iter().map(|slot| slot.as_str().to_string()).collect(),
            family_members: draft.family_members,
            monthly_budget: draft.monthly_budget,
            water_reminders: draft.water_reminders,
            reminder_interval_hours: draft.reminder_interval_hours,
        }
    }
}
