//! User repository.

use chrono::{Duration, Utc};

use fame_core::types::DbId;

use crate::models::user::{CreateUser, User};
use crate::DbPool;

const COLUMNS: &str = "id, email, full_name, password_hash, is_active, \
     last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Failed logins before the account locks.
pub const MAX_FAILED_LOGINS: i32 = 5;
/// How long a lockout lasts.
pub const LOCKOUT_MINUTES: i64 = 15;

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &DbPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, full_name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(&input.password_hash)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Bump the failed-login counter, locking the account once the
    /// threshold is reached. Returns the updated row.
    pub async fn record_failed_login(pool: &DbPool, id: DbId) -> Result<User, sqlx::Error> {
        let locked_until = Utc::now() + Duration::minutes(LOCKOUT_MINUTES);
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET failed_login_count = failed_login_count + 1,
                 locked_until = CASE
                     WHEN failed_login_count + 1 >= $2 THEN $3
                     ELSE locked_until
                 END,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(MAX_FAILED_LOGINS)
        .bind(locked_until)
        .fetch_one(pool)
        .await
    }

    /// Clear the failure counter and stamp the login time.
    pub async fn record_successful_login(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users
             SET failed_login_count = 0,
                 locked_until = NULL,
                 last_login_at = NOW(),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
