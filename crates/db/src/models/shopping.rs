//! Shopping list item model.

use serde::Serialize;
use sqlx::FromRow;

use fame_core::types::{DbId, Timestamp};

/// A row from the `shopping_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShoppingItem {
    pub id: DbId,
    pub user_id: DbId,
    pub category: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub estimated_price: Option<f64>,
    pub checked: bool,
    pub created_at: Timestamp,
}
