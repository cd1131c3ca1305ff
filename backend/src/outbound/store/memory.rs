//! In-memory record store used by tests and local development.
//!
//! State lives behind a single mutex, so each primitive is atomic exactly
//! like its Redis counterpart while sequences of calls still interleave.
//! Clones share state; a test can keep one handle to stage or inspect
//! records while the service under test owns another.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{RecordStore, StoreError};

/// Shared in-memory implementation of [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    counters: BTreeMap<String, u64>,
    records: BTreeMap<String, BTreeMap<String, String>>,
    indexes: BTreeMap<String, BTreeSet<String>>,
}

impl MemoryRecordStore {
    /// Fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::command("memory store mutex poisoned"))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn allocate_counter(&self, name: &str) -> Result<u64, StoreError> {
        let mut state = self.lock()?;
        let counter = state.counters.entry(name.to_owned()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn put_record(&self, key: &str, fields: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let record = state.records.entry(key.to_owned()).or_default();
        for (field, value) in fields {
            record.insert((*field).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    async fn get_record(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self.lock()?.records.get(key).cloned().unwrap_or_default())
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?
            .records
            .entry(key.to_owned())
            .or_default()
            .insert(field.to_owned(), value.to_owned());
        Ok(())
    }

    async fn record_exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.records.contains_key(key))
    }

    async fn delete_record(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.records.remove(key);
        Ok(())
    }

    async fn index_add(&self, index: &str, key: &str) -> Result<(), StoreError> {
        self.lock()?
            .indexes
            .entry(index.to_owned())
            .or_default()
            .insert(key.to_owned());
        Ok(())
    }

    async fn index_remove(&self, index: &str, key: &str) -> Result<(), StoreError> {
        if let Some(members) = self.lock()?.indexes.get_mut(index) {
            members.remove(key);
        }
        Ok(())
    }

    async fn index_members(&self, index: &str) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.lock()?.indexes.get(index).cloned().unwrap_or_default())
    }

    async fn index_size(&self, index: &str) -> Result<u64, StoreError> {
        Ok(self
            .lock()?
            .indexes
            .get(index)
            .map_or(0, |members| members.len() as u64))
    }
}
