//! Refresh session repository.

use fame_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &DbPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        sqlx::query_as::<_, UserSession>(&format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(input.user_id)
        .bind(&input.refresh_token_hash)
        .bind(input.expires_at)
        .fetch_one(pool)
        .await
    }

    /// Look up a live session by the hash of the presented refresh token.
    pub async fn find_active_by_token_hash(
        pool: &DbPool,
        token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        sqlx::query_as::<_, UserSession>(&format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = FALSE
               AND expires_at > NOW()"
        ))
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    pub async fn revoke(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_sessions SET is_revoked = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn revoke_all_for_user(pool: &DbPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE
             WHERE user_id = $1 AND is_revoked = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that are expired or revoked. Returns rows removed.
    pub async fn cleanup_expired(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions WHERE expires_at < NOW() OR is_revoked = TRUE",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
