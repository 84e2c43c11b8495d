//! Shopping list repository.

use fame_core::shopping::ShoppingItemDraft;
use fame_core::types::DbId;

use crate::models::shopping::ShoppingItem;
use crate::DbPool;

const COLUMNS: &str = "id, user_id, category, name, quantity, unit, \
     estimated_price, checked, created_at";

pub struct ShoppingRepo;

impl ShoppingRepo {
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Vec<ShoppingItem>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingItem>(&format!(
            "SELECT {COLUMNS} FROM shopping_items
             WHERE user_id = $1
             ORDER BY category, name"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the user's entire list with freshly aggregated items. Runs
    /// in a transaction; checked state is intentionally not carried over.
    pub async fn replace_for_user(
        pool: &DbPool,
        user_id: DbId,
        items: &[ShoppingItemDraft],
    ) -> Result<Vec<ShoppingItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM shopping_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, ShoppingItem>(&format!(
                "INSERT INTO shopping_items
                     (user_id, category, name, quantity, unit, estimated_price)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING {COLUMNS}"
            ))
            .bind(user_id)
            .bind(&item.category)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(&item.unit)
            .bind(item.estimated_price)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Flip an item's checked state. Scoped to the owning user.
    pub async fn toggle_checked(
        pool: &DbPool,
        user_id: DbId,
        item_id: DbId,
    ) -> Result<Option<ShoppingItem>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingItem>(&format!(
            "UPDATE shopping_items SET checked = NOT checked
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
