//! Meal catalog domain types.
//!
//! The catalog is stored in the `meals` table; ingredients and instructions
//! are JSONB columns deserializing into these types.

use serde::{Deserialize, Serialize};

use crate::profile::MealSlot;
use crate::types::DbId;

/// One ingredient of a catalog meal.
///
/// `amount` is per single serving; plan and shopping-list generation scale it
/// by the household size. `price` is the estimated cost of that amount, when
/// known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    /// Shopping-list category (e.g. "produce", "dairy").
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A meal from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub meal_slot: MealSlot,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub video_url: Option<String>,
}

impl Meal {
    /// Whether the meal contains an ingredient matching any of the given
    /// allergy labels (case-insensitive full-name match).
    pub fn conflicts_with_allergies(&self, allergies: &[String]) -> bool {
        self.ingredients.iter().any(|ingredient| {
            allergies
                .iter()
                .any(|allergy| ingredient.name.eq_ignore_ascii_case(allergy))
        })
    }
}
