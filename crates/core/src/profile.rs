//! The draft profile aggregate built across the onboarding wizard steps.
//!
//! Every field has a documented default, so a draft is always fully
//! initialized. Inputs are never rejected: out-of-range numerics are clamped
//! into their nominal range and unknown enum strings degrade to the unset
//! default. Each wizard step owns a disjoint slice of the aggregate, enforced
//! at the type level by one update DTO per step (see [`StepUpdate`]).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// User gender, unset until the user picks one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unset,
}

impl Gender {
    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unset => "unset",
        }
    }

    /// Parse a stored string. Unknown values degrade to [`Gender::Unset`].
    pub fn from_str_lenient(s: &str) -> Self {
        match s {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unset,
        }
    }
}

/// The user's primary nutrition goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    Maintain,
    #[default]
    Unset,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::GainMuscle => "gain_muscle",
            Self::Maintain => "maintain",
            Self::Unset => "unset",
        }
    }

    /// Parse a stored string. Unknown values degrade to [`Goal::Unset`].
    pub fn from_str_lenient(s: &str) -> Self {
        match s {
            "lose_weight" => Self::LoseWeight,
            "gain_muscle" => Self::GainMuscle,
            "maintain" => Self::Maintain,
            _ => Self::Unset,
        }
    }
}

/// The four meal slots a household plan can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

/// All meal slots in canonical day order.
pub const ALL_MEAL_SLOTS: [MealSlot; 4] = [
    MealSlot::Breakfast,
    MealSlot::Lunch,
    MealSlot::Snack,
    MealSlot::Dinner,
];

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }

    /// Parse a stored string. Unknown slots are dropped by callers.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "snack" => Some(Self::Snack),
            "dinner" => Some(Self::Dinner),
            _ => None,
        }
    }
}

/// Fixed catalog of sport types, plus "none" for sedentary users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    Running,
    Cycling,
    Swimming,
    Gym,
    Yoga,
    Football,
    Basketball,
    Tennis,
    MartialArts,
    Dancing,
    #[default]
    None,
}

impl SportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Gym => "gym",
            Self::Yoga => "yoga",
            Self::Football => "football",
            Self::Basketball => "basketball",
            Self::Tennis => "tennis",
            Self::MartialArts => "martial_arts",
            Self::Dancing => "dancing",
            Self::None => "none",
        }
    }

    /// Parse a stored string. Unknown values degrade to [`SportType::None`].
    pub fn from_str_lenient(s: &str) -> Self {
        match s {
            "running" => Self::Running,
            "cycling" => Self::Cycling,
            "swimming" => Self::Swimming,
            "gym" => Self::Gym,
            "yoga" => Self::Yoga,
            "football" => Self::Football,
            "basketball" => Self::Basketball,
            "tennis" => Self::Tennis,
            "martial_arts" => Self::MartialArts,
            "dancing" => Self::Dancing,
            _ => Self::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Clamp ranges
// ---------------------------------------------------------------------------

pub const AGE_MIN: i32 = 18;
pub const AGE_MAX: i32 = 100;
pub const WEIGHT_MIN_KG: f64 = 30.0;
pub const WEIGHT_MAX_KG: f64 = 200.0;
pub const HEIGHT_MIN_CM: f64 = 120.0;
pub const HEIGHT_MAX_CM: f64 = 220.0;
pub const SPORT_FREQUENCY_MIN: i32 = 1;
pub const SPORT_FREQUENCY_MAX: i32 = 7;
pub const FAMILY_MEMBERS_MIN: i32 = 1;
pub const FAMILY_MEMBERS_MAX: i32 = 10;
pub const BUDGET_MIN: f64 = 50.0;
pub const BUDGET_MAX: f64 = 2000.0;
pub const REMINDER_INTERVAL_MIN_HOURS: i32 = 1;
pub const REMINDER_INTERVAL_MAX_HOURS: i32 = 6;

// ---------------------------------------------------------------------------
// Draft profile
// ---------------------------------------------------------------------------

/// The in-progress profile record owned by one wizard controller instance.
///
/// Also the shape of a persisted profile: the persistence adapter maps this
/// aggregate to and from the `user_profiles` row one-to-one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftProfile {
    // Step 1: personal info
    pub gender: Gender,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,

    // Step 2: sport activity
    pub sport_type: SportType,
    /// Training sessions per week; meaningful only when `sport_type != None`.
    pub sport_frequency: i32,

    // Step 3: dietary restrictions & household meal slots
    pub allergies: Vec<String>,
    pub meals: Vec<MealSlot>,

    // Step 4: goal & family
    pub goal: Goal,
    pub family_members: i32,

    // Step 5: budget
    pub monthly_budget: f64,

    // Step 6: hydration reminders
    pub water_reminders: bool,
    /// Reminder interval in hours; meaningful only when reminders are on.
    pub reminder_interval_hours: i32,
}

impl Default for DraftProfile {
    fn default() -> Self {
        Self {
            gender: Gender::Unset,
            age: 25,
            weight_kg: 70.0,
            height_cm: 170.0,
            sport_type: SportType::None,
            sport_frequency: 3,
            allergies: Vec::new(),
            meals: Vec::new(),
            goal: Goal::Unset,
            family_members: 1,
            monthly_budget: 300.0,
            water_reminders: false,
            reminder_interval_hours: 2,
        }
    }
}

impl DraftProfile {
    /// Merge a per-step partial update into the draft.
    ///
    /// Last write wins per field. Numerics are clamped into their nominal
    /// range, allergy labels are trimmed and deduplicated, and meal slots are
    /// deduplicated while preserving order. Never fails.
    pub fn apply(&mut self, update: StepUpdate) {
        match update {
            StepUpdate::PersonalInfo(u) => {
                if let Some(gender) = u.gender {
                    self.gender = gender;
                }
                if let Some(age) = u.age {
                    self.age = age.clamp(AGE_MIN, AGE_MAX);
                }
                if let Some(weight) = u.weight_kg {
                    self.weight_kg = weight.clamp(WEIGHT_MIN_KG, WEIGHT_MAX_KG);
                }
                if let Some(height) = u.height_cm {
                    self.height_cm = height.clamp(HEIGHT_MIN_CM, HEIGHT_MAX_CM);
                }
            }
            StepUpdate::Activity(u) => {
                if let Some(sport) = u.sport_type {
                    self.sport_type = sport;
                }
                if let Some(freq) = u.sport_frequency {
                    self.sport_frequency = freq.clamp(SPORT_FREQUENCY_MIN, SPORT_FREQUENCY_MAX);
                }
            }
            StepUpdate::Dietary(u) => {
                if let Some(allergies) = u.allergies {
                    self.allergies = dedup_labels(allergies);
                }
                if let Some(meals) = u.meals {
                    self.meals = dedup_slots(meals);
                }
            }
            StepUpdate::Goals(u) => {
                if let Some(goal) = u.goal {
                    self.goal = goal;
                }
                if let Some(members) = u.family_members {
                    self.family_members = members.clamp(FAMILY_MEMBERS_MIN, FAMILY_MEMBERS_MAX);
                }
            }
            StepUpdate::Budget(u) => {
                if let Some(budget) = u.monthly_budget {
                    self.monthly_budget = budget.clamp(BUDGET_MIN, BUDGET_MAX);
                }
            }
            StepUpdate::Hydration(u) => {
                if let Some(enabled) = u.water_reminders {
                    self.water_reminders = enabled;
                }
                if let Some(interval) = u.reminder_interval_hours {
                    self.reminder_interval_hours =
                        interval.clamp(REMINDER_INTERVAL_MIN_HOURS, REMINDER_INTERVAL_MAX_HOURS);
                }
            }
        }
    }
}

/// Trim, drop empties, and deduplicate allergy labels preserving order.
fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.iter().any(|existing| existing == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Deduplicate meal slots preserving first-seen order.
fn dedup_slots(slots: Vec<MealSlot>) -> Vec<MealSlot> {
    let mut out: Vec<MealSlot> = Vec::with_capacity(slots.len());
    for slot in slots {
        if !out.contains(&slot) {
            out.push(slot);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Per-step update DTOs
// ---------------------------------------------------------------------------

/// Step 1 fields: gender, age, weight, height.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfoUpdate {
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

/// Step 2 fields: sport type and weekly frequency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityUpdate {
    pub sport_type: Option<SportType>,
    pub sport_frequency: Option<i32>,
}

/// Step 3 fields: allergy labels and included meal slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietaryUpdate {
    pub allergies: Option<Vec<String>>,
    pub meals: Option<Vec<MealSlot>>,
}

/// Step 4 fields: goal and family member count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalsUpdate {
    pub goal: Option<Goal>,
    pub family_members: Option<i32>,
}

/// Step 5 field: monthly food budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetUpdate {
    pub monthly_budget: Option<f64>,
}

/// Step 6 fields: water reminder flag and interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HydrationUpdate {
    pub water_reminders: Option<bool>,
    pub reminder_interval_hours: Option<i32>,
}

/// A partial update scoped to exactly one wizard step.
///
/// The tagged representation keeps each step's writable fields disjoint: a
/// dietary payload cannot carry (or accidentally overwrite) a budget field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", content = "fields", rename_all = "snake_case")]
pub enum StepUpdate {
    PersonalInfo(PersonalInfoUpdate),
    Activity(ActivityUpdate),
    Dietary(DietaryUpdate),
    Goals(GoalsUpdate),
    Budget(BudgetUpdate),
    Hydration(HydrationUpdate),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let draft = DraftProfile::default();
        assert_eq!(draft.gender, Gender::Unset);
        assert_eq!(draft.age, 25);
        assert_eq!(draft.weight_kg, 70.0);
        assert_eq!(draft.height_cm, 170.0);
        assert_eq!(draft.sport_type, SportType::None);
        assert_eq!(draft.sport_frequency, 3);
        assert!(draft.allergies.is_empty());
        assert!(draft.meals.is_empty());
        assert_eq!(draft.goal, Goal::Unset);
        assert_eq!(draft.family_members, 1);
        assert_eq!(draft.monthly_budget, 300.0);
        assert!(!draft.water_reminders);
        assert_eq!(draft.reminder_interval_hours, 2);
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut draft = DraftProfile::default();
        draft.apply(StepUpdate::PersonalInfo(PersonalInfoUpdate {
            gender: Some(Gender::Female),
            age: Some(30),
            ..Default::default()
        }));
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.age, 30);
        // Untouched fields keep their defaults.
        assert_eq!(draft.weight_kg, 70.0);
        assert_eq!(draft.height_cm, 170.0);
    }

    #[test]
    fn apply_is_idempotent() {
        let update = StepUpdate::Dietary(DietaryUpdate {
            allergies: Some(vec!["Gluten".into(), "Lactose".into()]),
            meals: Some(vec![MealSlot::Breakfast, MealSlot::Dinner]),
        });

        let mut once = DraftProfile::default();
        once.apply(update.clone());

        let mut twice = DraftProfile::default();
        twice.apply(update.clone());
        twice.apply(update);

        assert_eq!(once, twice);
    }

    #[test]
    fn numeric_fields_are_clamped() {
        let mut draft = DraftProfile::default();
        draft.apply(StepUpdate::PersonalInfo(PersonalInfoUpdate {
            age: Some(5),
            weight_kg: Some(1000.0),
            height_cm: Some(10.0),
            ..Default::default()
        }));
        assert_eq!(draft.age, AGE_MIN);
        assert_eq!(draft.weight_kg, WEIGHT_MAX_KG);
        assert_eq!(draft.height_cm, HEIGHT_MIN_CM);

        draft.apply(StepUpdate::Budget(BudgetUpdate {
            monthly_budget: Some(9999.0),
        }));
        assert_eq!(draft.monthly_budget, BUDGET_MAX);

        draft.apply(StepUpdate::Hydration(HydrationUpdate {
            water_reminders: Some(true),
            reminder_interval_hours: Some(24),
        }));
        assert_eq!(draft.reminder_interval_hours, REMINDER_INTERVAL_MAX_HOURS);
    }

    #[test]
    fn allergies_are_trimmed_and_deduplicated() {
        let mut draft = DraftProfile::default();
        draft.apply(StepUpdate::Dietary(DietaryUpdate {
            allergies: Some(vec![
                " Gluten ".into(),
                "Gluten".into(),
                "".into(),
                "Peanuts".into(),
            ]),
            meals: None,
        }));
        assert_eq!(draft.allergies, vec!["Gluten", "Peanuts"]);
    }

    #[test]
    fn meal_slots_are_deduplicated_in_order() {
        let mut draft = DraftProfile::default();
        draft.apply(StepUpdate::Dietary(DietaryUpdate {
            allergies: None,
            meals: Some(vec![
                MealSlot::Dinner,
                MealSlot::Breakfast,
                MealSlot::Dinner,
            ]),
        }));
        assert_eq!(draft.meals, vec![MealSlot::Dinner, MealSlot::Breakfast]);
    }

    #[test]
    fn enum_strings_roundtrip() {
        for gender in [Gender::Male, Gender::Female, Gender::Unset] {
            assert_eq!(Gender::from_str_lenient(gender.as_str()), gender);
        }
        for goal in [Goal::LoseWeight, Goal::GainMuscle, Goal::Maintain, Goal::Unset] {
            assert_eq!(Goal::from_str_lenient(goal.as_str()), goal);
        }
        for slot in ALL_MEAL_SLOTS {
            assert_eq!(MealSlot::from_str_opt(slot.as_str()), Some(slot));
        }
    }

    #[test]
    fn unknown_enum_strings_degrade_to_defaults() {
        assert_eq!(Gender::from_str_lenient("other"), Gender::Unset);
        assert_eq!(Goal::from_str_lenient("bulk"), Goal::Unset);
        assert_eq!(SportType::from_str_lenient("curling"), SportType::None);
        assert_eq!(MealSlot::from_str_opt("brunch"), None);
    }

    #[test]
    fn step_update_json_shape() {
        let json = serde_json::json!({
            "step": "budget",
            "fields": { "monthly_budget": 400.0 }
        });
        let update: StepUpdate = serde_json::from_value(json).expect("valid step update");
        let mut draft = DraftProfile::default();
        draft.apply(update);
        assert_eq!(draft.monthly_budget, 400.0);
    }
}
