//! Meal plan entry model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use fame_core::types::{DbId, Timestamp};

/// A row from the `plan_entries` table: one catalog meal assigned to a
/// (user, date, slot). Unique per (user_id, plan_date, meal_slot).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub plan_date: NaiveDate,
    pub meal_slot: String,
    pub meal_id: DbId,
    pub created_at: Timestamp,
}
