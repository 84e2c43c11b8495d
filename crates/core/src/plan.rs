//! Weekly meal plan generation.
//!
//! Plan generation is deterministic: for each day of the week and each meal
//! slot the profile includes, candidates are the catalog meals for that slot
//! that do not conflict with the user's allergies, rotated round-robin by day
//! so consecutive days vary without randomness.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::catalog::Meal;
use crate::profile::{DraftProfile, MealSlot, ALL_MEAL_SLOTS};
use crate::types::DbId;

/// Days in one generated plan.
pub const PLAN_DAYS: u64 = 7;

/// One generated plan entry: a catalog meal assigned to a date and slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMeal {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub meal_id: DbId,
}

/// Build a seven-day plan starting at `week_start`.
///
/// Only the profile's included meal slots are planned; an empty selection
/// means every slot (the pre-onboarding permissive default). Slots with no
/// allergy-safe candidate in the catalog are skipped rather than failing the
/// whole plan.
pub fn build_week_plan(
    profile: &DraftProfile,
    catalog: &[Meal],
    week_start: NaiveDate,
) -> Vec<PlannedMeal> {
    let slots: Vec<MealSlot> = if profile.meals.is_empty() {
        ALL_MEAL_SLOTS.to_vec()
    } else {
        profile.meals.clone()
    };

    let mut plan = Vec::new();
    for slot in slots {
        let candidates: Vec<&Meal> = catalog
            .iter()
            .filter(|meal| meal.meal_slot == slot)
            .filter(|meal| !meal.conflicts_with_allergies(&profile.allergies))
            .collect();

        if candidates.is_empty() {
            tracing::debug!(slot = slot.as_str(), "No allergy-safe meals for slot; skipping");
            continue;
        }

        for day in 0..PLAN_DAYS {
            let Some(date) = week_start.checked_add_days(Days::new(day)) else {
                break;
            };
            let meal = candidates[day as usize % candidates.len()];
            plan.push(PlannedMeal {
                date,
                slot,
                meal_id: meal.id,
            });
        }
    }

    plan.sort_by_key(|entry| (entry.date, entry.slot.as_str()));
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Ingredient;

    fn meal(id: DbId, slot: MealSlot, ingredient: &str) -> Meal {
        Meal {
            id,
            title: format!("meal-{id}"),
            description: String::new(),
            meal_slot: slot,
            calories: 400,
            protein_g: 20.0,
            carbs_g: 30.0,
            fat_g: 10.0,
            ingredients: vec![Ingredient {
                name: ingredient.into(),
                amount: 100.0,
                unit: "g".into(),
                category: "pantry".into(),
                price: None,
            }],
            instructions: Vec::new(),
            video_url: None,
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    #[test]
    fn plans_only_included_slots_for_seven_days() {
        let mut profile = DraftProfile::default();
        profile.meals = vec![MealSlot::Breakfast, MealSlot::Dinner];

        let catalog = vec![
            meal(1, MealSlot::Breakfast, "oats"),
            meal(2, MealSlot::Lunch, "chicken"),
            meal(3, MealSlot::Dinner, "salmon"),
        ];

        let plan = build_week_plan(&profile, &catalog, monday());
        assert_eq!(plan.len() as u64, 2 * PLAN_DAYS);
        assert!(plan.iter().all(|p| p.slot != MealSlot::Lunch));
        assert_eq!(plan.iter().filter(|p| p.date == monday()).count(), 2);
    }

    #[test]
    fn empty_slot_selection_plans_all_slots() {
        let profile = DraftProfile::default();
        let catalog = vec![
            meal(1, MealSlot::Breakfast, "oats"),
            meal(2, MealSlot::Lunch, "chicken"),
            meal(3, MealSlot::Snack, "yogurt"),
            meal(4, MealSlot::Dinner, "salmon"),
        ];
        let plan = build_week_plan(&profile, &catalog, monday());
        assert_eq!(plan.len() as u64, 4 * PLAN_DAYS);
    }

    #[test]
    fn allergy_conflicts_are_excluded() {
        let mut profile = DraftProfile::default();
        profile.meals = vec![MealSlot::Lunch];
        profile.allergies = vec!["Chicken".into()];

        let catalog = vec![
            meal(1, MealSlot::Lunch, "chicken"),
            meal(2, MealSlot::Lunch, "tofu"),
        ];

        let plan = build_week_plan(&profile, &catalog, monday());
        assert_eq!(plan.len() as u64, PLAN_DAYS);
        assert!(plan.iter().all(|p| p.meal_id == 2));
    }

    #[test]
    fn candidates_rotate_round_robin_by_day() {
        let mut profile = DraftProfile::default();
        profile.meals = vec![MealSlot::Dinner];

        let catalog = vec![
            meal(1, MealSlot::Dinner, "salmon"),
            meal(2, MealSlot::Dinner, "beef"),
        ];

        let plan = build_week_plan(&profile, &catalog, monday());
        assert_eq!(plan[0].meal_id, 1);
        assert_eq!(plan[1].meal_id, 2);
        assert_eq!(plan[2].meal_id, 1);
    }

    #[test]
    fn slot_without_safe_candidates_is_skipped() {
        let mut profile = DraftProfile::default();
        profile.meals = vec![MealSlot::Snack];
        profile.allergies = vec!["yogurt".into()];

        let catalog = vec![meal(1, MealSlot::Snack, "yogurt")];
        let plan = build_week_plan(&profile, &catalog, monday());
        assert!(plan.is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let mut profile = DraftProfile::default();
        profile.meals = vec![MealSlot::Breakfast, MealSlot::Lunch];
        let catalog = vec![
            meal(1, MealSlot::Breakfast, "oats"),
            meal(2, MealSlot::Lunch, "chicken"),
            meal(3, MealSlot::Lunch, "tofu"),
        ];
        let a = build_week_plan(&profile, &catalog, monday());
        let b = build_week_plan(&profile, &catalog, monday());
        assert_eq!(a, b);
    }
}
