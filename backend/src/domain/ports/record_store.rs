//! Port abstracting the shared record store.
//!
//! The store keeps three primitive shapes: named counters, records (string
//! field maps addressed by key), and indexes (sets of record keys). Each
//! primitive call is atomic on its own; nothing here spans several keys in
//! one step. Services are written against exactly that contract and tolerate
//! the intermediate states the call ordering can expose to readers.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

/// Failures surfaced by record store implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or a connection could not be obtained.
    #[error("record store unavailable: {message}")]
    Unavailable {
        /// Description of the connectivity failure.
        message: String,
    },
    /// The store rejected or failed an individual command.
    #[error("record store command failed: {message}")]
    Command {
        /// Description of the command failure.
        message: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::Unavailable`] from any displayable cause.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build a [`StoreError::Command`] from any displayable cause.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}

/// Primitive store operations the domain services rely on.
///
/// Implementations must make each method individually atomic. There is no
/// read-modify-write across calls, so any multi-step sequence a service
/// performs can interleave with other writers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Atomically increment the named counter and return the new value.
    ///
    /// The first allocation on a fresh counter returns 1.
    async fn allocate_counter(&self, name: &str) -> Result<u64, StoreError>;

    /// Write `fields` into the record at `key`, creating it if absent.
    ///
    /// Fields not named are left untouched.
    async fn put_record(&self, key: &str, fields: &[(&str, &str)]) -> Result<(), StoreError>;

    /// Fetch the full field map of the record at `key`.
    ///
    /// An absent record yields an empty map, indistinguishable from a record
    /// with no fields.
    async fn get_record(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError>;

    /// Set a single field, creating the record if absent.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Whether a record exists at `key`.
    async fn record_exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Remove the record at `key`. Removing an absent record is not an error.
    async fn delete_record(&self, key: &str) -> Result<(), StoreError>;

    /// Add `key` to the named index. Adding an existing member is a no-op.
    async fn index_add(&self, index: &str, key: &str) -> Result<(), StoreError>;

    /// Remove `key` from the named index. Removing a non-member is a no-op.
    async fn index_remove(&self, index: &str, key: &str) -> Result<(), StoreError>;

    /// Snapshot the members of the named index.
    async fn index_members(&self, index: &str) -> Result<BTreeSet<String>, StoreError>;

    /// Number of members in the named index.
    async fn index_size(&self, index: &str) -> Result<u64, StoreError>;
}
