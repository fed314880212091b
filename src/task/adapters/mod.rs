//! Adapter implementations for task ports.

pub mod memory;
pub mod postgres;

use crate::config::{StoreBackend, StoreConfig};
use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use std::sync::Arc;
use tracing::info;

/// Opens the repository selected by `config`.
///
/// # Errors
///
/// Returns [`crate::task::ports::TaskRepositoryError::Persistence`] when the
/// `PostgreSQL` pool cannot be built.
pub fn open_repository(config: &StoreConfig) -> TaskRepositoryResult<Arc<dyn TaskRepository>> {
    match config.backend() {
        StoreBackend::InMemory => {
            info!("using in-memory task store");
            Ok(Arc::new(memory::InMemoryTaskRepository::new()))
        }
        StoreBackend::Postgres {
            database_url,
            pool_max_size,
        } => {
            info!(pool_max_size, "connecting to PostgreSQL task store");
            let pool = postgres::connect(database_url, pool_max_size)?;
            Ok(Arc::new(postgres::PostgresTaskRepository::new(pool)))
        }
    }
}
