//! PostgreSQL adapter over [`RecordRepo`].

use async_trait::async_trait;
use watchlist_core::query::{ListQuery, RecordPage};
use watchlist_core::record::Record;
use watchlist_core::types::RecordId;

use super::RecordStore;
use crate::error::StoreError;
use crate::repositories::RecordRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(RecordRepo::list_all(&self.pool).await?)
    }

    async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        Ok(RecordRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        Ok(RecordRepo::create(&self.pool, record).await?)
    }

    async fn update(&self, record: &Record) -> Result<bool, StoreError> {
        Ok(RecordRepo::update(&self.pool, record).await?)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(RecordRepo::delete(&self.pool, id).await?)
    }

    async fn query(&self, query: &ListQuery) -> Result<RecordPage, StoreError> {
        let (items, window) = RecordRepo::page(&self.pool, query).await?;
        Ok(RecordPage::new(items, window))
    }

    async fn seed_if_uninitialized(&self, seed: Vec<Record>) -> Result<usize, StoreError> {
        Ok(RecordRepo::seed_if_uninitialized(&self.pool, &seed).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
