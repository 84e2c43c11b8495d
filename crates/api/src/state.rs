use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use fame_core::types::DbId;
use fame_core::wizard::WizardController;

use crate::config::ServerConfig;

/// Registry of in-progress onboarding wizard sessions, one per user.
///
/// The outer lock only guards map membership and is never held across an
/// await. Each controller sits behind its own lock; `try_lock` on it is the
/// double-submit guard — an overlapping request observes the controller busy
/// and is rejected instead of queued.
pub type WizardRegistry = Arc<Mutex<HashMap<DbId, Arc<Mutex<WizardController>>>>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fame_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory onboarding wizard sessions. Drafts live here until the
    /// final save; nothing is persisted for an abandoned wizard.
    pub wizards: WizardRegistry,
}

impl AppState {
    pub fn new(pool: fame_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            wizards: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
