//! Meal plan repository.

use chrono::NaiveDate;

use fame_core::types::DbId;

use crate::models::plan::PlanEntry;
use crate::DbPool;

const COLUMNS: &str = "id, user_id, plan_date, meal_slot, meal_id, created_at";

/// One row to insert when replacing a week.
pub struct NewPlanEntry {
    pub plan_date: NaiveDate,
    pub meal_slot: String,
    pub meal_id: DbId,
}

pub struct PlanRepo;

impl PlanRepo {
    /// Atomically replace the user's plan for `[start, end)` with the given
    /// entries. Delete and insert run in one transaction so a failed
    /// generation never leaves a half-empty week.
    pub async fn replace_range(
        pool: &DbPool,
        user_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
        entries: &[NewPlanEntry],
    ) -> Result<Vec<PlanEntry>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM plan_entries
             WHERE user_id = $1 AND plan_date >= $2 AND plan_date < $3",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .execute(&mut *tx)
        .await?;

        let mut inserted = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = sqlx::query_as::<_, PlanEntry>(&format!(
                "INSERT INTO plan_entries (user_id, plan_date, meal_slot, meal_id)
                 VALUES ($1, $2, $3, $4)
                 RETURNING {COLUMNS}"
            ))
            .bind(user_id)
            .bind(entry.plan_date)
            .bind(&entry.meal_slot)
            .bind(entry.meal_id)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn list_for_date(
        pool: &DbPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<PlanEntry>, sqlx::Error> {
        sqlx::query_as::<_, PlanEntry>(&format!(
            "SELECT {COLUMNS} FROM plan_entries
             WHERE user_id = $1 AND plan_date = $2
             ORDER BY meal_slot"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    pub async fn list_for_range(
        pool: &DbPool,
        user_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PlanEntry>, sqlx::Error> {
        sqlx::query_as::<_, PlanEntry>(&format!(
            "SELECT {COLUMNS} FROM plan_entries
             WHERE user_id = $1 AND plan_date >= $2 AND plan_date < $3
             ORDER BY plan_date, meal_slot"
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Move an entry to another date. Scoped to the owning user so one user
    /// cannot reschedule another's entries.
    pub async fn reschedule(
        pool: &DbPool,
        user_id: DbId,
        entry_id: DbId,
        new_date: NaiveDate,
    ) -> Result<Option<PlanEntry>, sqlx::Error> {
        sqlx::query_as::<_, PlanEntry>(&format!(
            "UPDATE plan_entries SET plan_date = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(entry_id)
        .bind(user_id)
        .bind(new_date)
        .fetch_optional(pool)
        .await
    }
}
