//! The record store port and its adapters.

pub mod file;
pub mod memory;
pub mod postgres;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use watchlist_core::query::{paginate, ListQuery, RecordPage};
use watchlist_core::record::Record;
use watchlist_core::types::RecordId;

use crate::error::StoreError;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Storage operations the service needs. Validation, pagination and
/// statistics stay outside the adapters.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Every stored record, in no guaranteed order.
    async fn list_all(&self) -> Result<Vec<Record>, StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError>;

    async fn insert(&self, record: &Record) -> Result<(), StoreError>;

    /// Replace the record with the same id. Returns `false` if it does not exist.
    async fn update(&self, record: &Record) -> Result<bool, StoreError>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Filtered, sorted page. Adapters with a query language override this.
    async fn query(&self, query: &ListQuery) -> Result<RecordPage, StoreError> {
        Ok(paginate(self.list_all().await?, query))
    }

    /// Write `seed` if the store has never been initialized. An initialized
    /// store that happens to be empty is left alone. Returns rows written.
    async fn seed_if_uninitialized(&self, seed: Vec<Record>) -> Result<usize, StoreError>;

    /// Cheap reachability check for `/health`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Which adapter backs the service, selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    File {
        path: PathBuf,
    },
    Memory,
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::File { .. } => "file",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Open the configured adapter. For PostgreSQL this connects, checks health
/// and applies migrations; any failure is returned rather than deferred.
pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn RecordStore>, StoreError> {
    let store: Arc<dyn RecordStore> = match backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = crate::create_pool(database_url, *max_connections).await?;
            tracing::info!(max_connections, "Database connection pool created");

            crate::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            crate::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Arc::new(PgRecordStore::new(pool))
        }
        StoreBackend::File { path } => {
            tracing::info!(path = %path.display(), "Using JSON file record store");
            Arc::new(FileRecordStore::new(path.clone()))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; data is lost on restart");
            Arc::new(MemoryRecordStore::new())
        }
    };
    Ok(store)
}
