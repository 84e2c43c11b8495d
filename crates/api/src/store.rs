//! Postgres-backed implementation of the wizard's profile persistence seam.

use async_trait::async_trait;

use fame_core::profile::DraftProfile;
use fame_core::types::DbId;
use fame_core::wizard::{ProfileStore, StoreError};
use fame_db::models::profile::UpsertUserProfile;
use fame_db::repositories::ProfileRepo;
use fame_db::DbPool;

/// [`ProfileStore`] over the `user_profiles` table.
///
/// `load` keeps the three-way contract intact: a missing row is `Ok(None)`,
/// and only a transport/database failure becomes `Err`.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: DbPool,
}

impl PgProfileStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn load(&self, user_id: DbId) -> Result<Option<DraftProfile>, StoreError> {
        let row = ProfileRepo::find_by_user(&self.pool, user_id)
            .await
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(row.map(|r| r.to_draft()))
    }

    async fn save(&self, user_id: DbId, draft: &DraftProfile) -> Result<(), StoreError> {
        let input = UpsertUserProfile::from(draft);
        ProfileRepo::upsert(&self.pool, user_id, &input)
            .await
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }
}
