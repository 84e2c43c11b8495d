//! Meal catalog repository. The catalog is migration-seeded and read-only
//! at runtime.

use fame_core::types::DbId;

use crate::models::meal::MealRow;
use crate::DbPool;

const COLUMNS: &str = "id, title, description, meal_slot, calories, protein_g, \
     carbs_g, fat_g, ingredients, instructions, video_url, created_at";

pub struct MealRepo;

impl MealRepo {
    pub async fn list_all(pool: &DbPool) -> Result<Vec<MealRow>, sqlx::Error> {
        sqlx::query_as::<_, MealRow>(&format!(
            "SELECT {COLUMNS} FROM meals ORDER BY meal_slot, id"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_ids(pool: &DbPool, ids: &[DbId]) -> Result<Vec<MealRow>, sqlx::Error> {
        sqlx::query_as::<_, MealRow>(&format!(
            "SELECT {COLUMNS} FROM meals WHERE id = ANY($1) ORDER BY meal_slot, id"
        ))
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
