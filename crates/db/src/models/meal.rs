//! Meal catalog row model.

use sqlx::FromRow;

use fame_core::catalog::{Ingredient, Meal};
use fame_core::error::CoreError;
use fame_core::profile::MealSlot;
use fame_core::types::{DbId, Timestamp};

/// A row from the `meals` catalog table. Ingredients and instructions are
/// JSONB columns.
#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub meal_slot: String,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub ingredients: serde_json::Value,
    pub instructions: serde_json::Value,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
}

impl MealRow {
    /// Map the row into the domain type. Catalog rows are migration-seeded,
    /// so malformed JSON or an unknown slot is an internal error rather than
    /// something to degrade silently.
    pub fn into_meal(self) -> Result<Meal, CoreError> {
        let slot = MealSlot::from_str_opt(&self.meal_slot).ok_or_else(|| {
            CoreError::Internal(format!(
                "meal {} has unknown slot '{}'",
                self.id, self.meal_slot
            ))
        })?;
        let ingredients: Vec<Ingredient> = serde_json::from_value(self.ingredients)
            .map_err(|e| CoreError::Internal(format!("meal {} ingredients: {e}", self.id)))?;
        let instructions: Vec<String> = serde_json::from_value(self.instructions)
            .map_err(|e| CoreError::Internal(format!("meal {} instructions: {e}", self.id)))?;

        Ok(Meal {
            id: self.id,
            title: self.title,
            description: self.description,
            meal_slot: slot,
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            ingredients,
            instructions,
            video_url: self.video_url,
        })
    }
}
