//! Idempotent bootstrap of the user records from a CSV file.
//!
//! The loader runs once at startup and only when the store holds no users at
//! all. Re-running against a populated store is a no-op, so restarting a
//! process never duplicates or overwrites accounts.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{RecordStore, StoreError};
use crate::domain::user::{self, User};

/// Errors returned while loading seed users.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The CSV source could not be read or parsed.
    #[error("failed to read seed file at {path:?}: {source}")]
    Csv {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// Writing a seed record to the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the loader did on this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and the file's users were written.
    Applied {
        /// Number of users loaded.
        user_count: usize,
    },
    /// The store already held users; nothing was touched.
    AlreadySeeded,
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    id: String,
    name: String,
    password: String,
}

/// Load users from `path` when and only when the `users` index is empty.
pub async fn seed_users(store: &dyn RecordStore, path: &Path) -> Result<SeedOutcome, SeedError> {
    if store.index_size(user::USERS_INDEX).await? > 0 {
        info!("user seed already applied; skipping");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let csv_error = |source| SeedError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

    let mut user_count = 0;
    for row in reader.deserialize() {
        let row: SeedRow = row.map_err(csv_error)?;
        let seeded = User::new(row.id, row.name, row.password);
        let key = user::user_key(seeded.id());
        store.put_record(&key, &seeded.record_fields()).await?;
        store.index_add(user::USERS_INDEX, &key).await?;
        user_count += 1;
    }

    info!(user_count, path = %path.display(), "user seed applied");
    Ok(SeedOutcome::Applied { user_count })
}
