//! In-process record store, used by tests and the `memory` backend.

use async_trait::async_trait;
use tokio::sync::RwLock;
use watchlist_core::record::Record;
use watchlist_core::types::RecordId;

use super::RecordStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    initialized: bool,
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    state: RwLock<State>,
}

impl MemoryRecordStore {
    /// An uninitialized, empty store; the first `seed_if_uninitialized` fills it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding exactly `records`, already marked initialized.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            state: RwLock::new(State {
                records,
                initialized: true,
            }),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.state.read().await.records.clone())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let state = self.state.read().await;
        Ok(state.records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.initialized = true;
        state.records.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &Record) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        Ok(state.records.len() != before)
    }

    async fn seed_if_uninitialized(&self, seed: Vec<Record>) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        if state.initialized {
            return Ok(0);
        }
        state.initialized = true;
        if !state.records.is_empty() {
            return Ok(0);
        }
        let count = seed.len();
        state.records = seed;
        Ok(count)
    }
}
