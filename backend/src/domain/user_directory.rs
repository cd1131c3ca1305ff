//! Read side of the user collection.

use std::sync::Arc;

use tracing::warn;

use crate::domain::error::Error;
use crate::domain::ports::RecordStore;
use crate::domain::user::{self, User};

/// Lists provisioned users from the shared record store.
pub struct UserDirectory {
    store: Arc<dyn RecordStore>,
}

impl UserDirectory {
    /// Directory over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// List every user currently indexed.
    ///
    /// Index entries whose record has vanished or no longer decodes are
    /// skipped and logged rather than failing the whole listing.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        let members = self.store.index_members(user::USERS_INDEX).await?;
        let mut users = Vec::with_capacity(members.len());
        for key in &members {
            let fields = self.store.get_record(key).await?;
            match User::from_record(&fields) {
                Ok(user) => users.push(user),
                Err(err) => warn!(key = %key, error = %err, "skipping undecodable user record"),
            }
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::outbound::store::MemoryRecordStore;

    async fn provision(store: &MemoryRecordStore, user: &User) {
        let key = user::user_key(user.id());
        store
            .put_record(&key, &user.record_fields())
            .await
            .expect("put user record");
        store
            .index_add(user::USERS_INDEX, &key)
            .await
            .expect("index user record");
    }

    #[tokio::test]
    async fn list_returns_every_provisioned_user() {
        let store = MemoryRecordStore::new();
        provision(&store, &User::new("1", "admin", "admin123")).await;
        provision(&store, &User::new("2", "amelie", "poulain75")).await;

        let mut users = UserDirectory::new(Arc::new(store)).list().await.expect("list");
        users.sort_by(|a, b| a.id().cmp(b.id()));
        assert_eq!(
            users,
            vec![
                User::new("1", "admin", "admin123"),
                User::new("2", "amelie", "poulain75"),
            ]
        );
    }

    #[tokio::test]
    async fn list_is_empty_on_a_fresh_store() {
        let users = UserDirectory::new(Arc::new(MemoryRecordStore::new()))
            .list()
            .await
            .expect("list");
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn dangling_index_entries_are_skipped() {
        let store = MemoryRecordStore::new();
        provision(&store, &User::new("1", "admin", "admin123")).await;
        store
            .index_add(user::USERS_INDEX, "users:99")
            .await
            .expect("index dangling key");

        let users = UserDirectory::new(Arc::new(store)).list().await.expect("list");
        assert_eq!(users, vec![User::new("1", "admin", "admin123")]);
    }
}
