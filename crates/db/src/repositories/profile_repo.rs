//! User profile repository.
//!
//! One row per user. `upsert` is idempotent: the first completion inserts,
//! every later save replaces the row in place via the user_id conflict
//! target, so re-running onboarding never duplicates rows.

use fame_core::types::DbId;

use crate::models::profile::{UpsertUserProfile, UserProfile};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, gender, age, weight_kg, height_cm, sport_type, \
     sport_frequency, allergies, goal, meals, family_members, monthly_budget, \
     water_reminders, reminder_interval_hours, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Whether a profile row exists for the user. This is what makes a
    /// user count as onboarded.
    pub async fn exists(pool: &DbPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM user_profiles WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    pub async fn upsert(
        pool: &DbPool,
        user_id: DbId,
        input: &UpsertUserProfile,
    ) -> Result<UserProfile, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "INSERT INTO user_profiles (
                 user_id, gender, age, weight_kg, height_cm, sport_type,
                 sport_frequency, allergies, goal, meals, family_members,
                 monthly_budget, water_reminders, reminder_interval_hours
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             ON CONFLICT (user_id) DO UPDATE SET
                 gender = EXCLUDED.gender,
                 age = EXCLUDED.age,
                 weight_kg = EXCLUDED.weight_kg,
                 height_cm = EXCLUDED.height_cm,
                 sport_type = EXCLUDED.sport_type,
                 sport_frequency = EXCLUDED.sport_frequency,
                 allergies = EXCLUDED.allergies,
                 goal = EXCLUDED.goal,
                 meals = EXCLUDED.meals,
                 family_members = EXCLUDED.family_members,
                 monthly_budget = EXCLUDED.monthly_budget,
                 water_reminders = EXCLUDED.water_reminders,
                 reminder_interval_hours = EXCLUDED.reminder_interval_hours,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(&input.gender)
        .bind(input.age)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(&input.sport_type)
        .bind(input.sport_frequency)
        .bind(&input.allergies)
        .bind(&input.goal)
        .bind(&input.meals)
        .bind(input.family_members)
        .bind(input.monthly_budget)
        .bind(input.water_reminders)
        .bind(input.reminder_interval_hours)
        .fetch_one(pool)
        .await
    }
}
