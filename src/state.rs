//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::IdGenerator;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Connection pool for health probes; `None` on the in-memory backend
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Creates state backed by PostgreSQL repositories sharing `pool`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::postgres(pool, Arc::new(IdGenerator::new(0)));
    /// ```
    pub fn postgres(pool: AsyncDbPool, ids: Arc<IdGenerator>) -> Self {
        let repos = Repositories::postgres(pool.clone());
        Self {
            services: Services::new(repos, ids),
            db_pool: Some(pool),
        }
    }

    /// Creates state backed by empty in-memory repositories.
    pub fn in_memory(ids: Arc<IdGenerator>) -> Self {
        Self {
            services: Services::new(Repositories::in_memory(), ids),
            db_pool: None,
        }
    }
}
