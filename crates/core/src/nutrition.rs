//! Daily nutrition summaries over planned meals.

use serde::Serialize;

use crate::catalog::Meal;

/// Daily water intake goal in liters, derived from body weight at 35 ml/kg
/// and clamped to a sane range.
pub fn water_goal_liters(weight_kg: f64) -> f64 {
    (weight_kg * 0.035).clamp(1.5, 4.0)
}

/// Nutrition totals for one day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub meal_count: usize,
    pub water_goal_liters: f64,
}

impl DailySummary {
    /// Sum the macros of a day's meals. `weight_kg` drives the water goal.
    pub fn for_meals<'a>(meals: impl IntoIterator<Item = &'a Meal>, weight_kg: f64) -> Self {
        let mut summary = Self {
            calories: 0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            meal_count: 0,
            water_goal_liters: water_goal_liters(weight_kg),
        };
        for meal in meals {
            summary.calories += meal.calories;
            summary.protein_g += meal.protein_g;
            summary.carbs_g += meal.carbs_g;
            summary.fat_g += meal.fat_g;
            summary.meal_count += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MealSlot;

    fn meal(calories: i32, protein: f64, carbs: f64, fat: f64) -> Meal {
        Meal {
            id: 0,
            title: "m".into(),
            description: String::new(),
            meal_slot: MealSlot::Lunch,
            calories,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            video_url: None,
        }
    }

    #[test]
    fn sums_macros_across_meals() {
        let meals = [meal(350, 12.0, 45.0, 8.0), meal(420, 35.0, 20.0, 15.0)];
        let summary = DailySummary::for_meals(&meals, 70.0);
        assert_eq!(summary.calories, 770);
        assert_eq!(summary.protein_g, 47.0);
        assert_eq!(summary.carbs_g, 65.0);
        assert_eq!(summary.fat_g, 23.0);
        assert_eq!(summary.meal_count, 2);
    }

    #[test]
    fn empty_day_is_all_zero() {
        let summary = DailySummary::for_meals([], 70.0);
        assert_eq!(summary.calories, 0);
        assert_eq!(summary.meal_count, 0);
    }

    #[test]
    fn water_goal_scales_with_weight_and_clamps() {
        assert_eq!(water_goal_liters(70.0), 2.45);
        assert_eq!(water_goal_liters(30.0), 1.5);
        assert_eq!(water_goal_liters(200.0), 4.0);
    }
}
