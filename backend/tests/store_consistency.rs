//! Ordering and consistency-window coverage for the multi-step store
//! sequences.
//!
//! Creation and deletion are several primitive calls, not transactions. These
//! tests pin the call order services use and assert what a reader can see
//! between the steps, so the accepted window stays visible instead of being
//! locked away.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use backend::domain::auth::LoginCredentials;
use backend::domain::auth_service::AuthService;
use backend::domain::error::ErrorCode;
use backend::domain::ports::{RecordStore, StoreError};
use backend::domain::quote::{Quote, QuoteDraft, QuoteId};
use backend::domain::quotes_service::QuotesService;
use backend::domain::token::TokenSigner;
use backend::domain::user::{self, User};
use backend::domain::user_directory::UserDirectory;
use backend::outbound::store::MemoryRecordStore;

const SECRET: &str = "consistency-secret";

/// Store double recording which primitives ran, in order.
#[derive(Clone)]
struct RecordingStore {
    inner: MemoryRecordStore,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            inner: MemoryRecordStore::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn note(&self, call: &'static str) {
        self.calls.lock().expect("calls mutex").push(call);
    }

    fn take_calls(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.calls.lock().expect("calls mutex"))
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn allocate_counter(&self, name: &str) -> Result<u64, StoreError> {
        self.note("allocate_counter");
        self.inner.allocate_counter(name).await
    }

    async fn put_record(&self, key: &str, fields: &[(&str, &str)]) -> Result<(), StoreError> {
        self.note("put_record");
        self.inner.put_record(key, fields).await
    }

    async fn get_record(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        self.note("get_record");
        self.inner.get_record(key).await
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.note("set_field");
        self.inner.set_field(key, field, value).await
    }

    async fn record_exists(&self, key: &str) -> Result<bool, StoreError> {
        self.note("record_exists");
        self.inner.record_exists(key).await
    }

    async fn delete_record(&self, key: &str) -> Result<(), StoreError> {
        self.note("delete_record");
        self.inner.delete_record(key).await
    }

    async fn index_add(&self, index: &str, key: &str) -> Result<(), StoreError> {
        self.note("index_add");
        self.inner.index_add(index, key).await
    }

    async fn index_remove(&self, index: &str, key: &str) -> Result<(), StoreError> {
        self.note("index_remove");
        self.inner.index_remove(index, key).await
    }

    async fn index_members(&self, index: &str) -> Result<BTreeSet<String>, StoreError> {
        self.note("index_members");
        self.inner.index_members(index).await
    }

    async fn index_size(&self, index: &str) -> Result<u64, StoreError> {
        self.note("index_size");
        self.inner.index_size(index).await
    }
}

fn draft(text: &str) -> QuoteDraft {
    QuoteDraft::new("1", text).expect("valid draft")
}

#[tokio::test]
async fn creation_allocates_then_writes_then_indexes() {
    let store = RecordingStore::new();
    let service = QuotesService::new(Arc::new(store.clone()));

    service.add(&draft("ordre")).await.expect("add");

    assert_eq!(
        store.take_calls(),
        vec!["allocate_counter", "put_record", "index_add"]
    );
}

#[tokio::test]
async fn deletion_checks_then_removes_the_record_before_the_index_entry() {
    let store = RecordingStore::new();
    let service = QuotesService::new(Arc::new(store.clone()));
    let id = service.add(&draft("ordre")).await.expect("add");
    store.take_calls();

    service.delete(id).await.expect("delete");

    assert_eq!(
        store.take_calls(),
        vec!["record_exists", "delete_record", "index_remove"]
    );
}

#[tokio::test]
async fn a_half_created_quote_is_updatable_before_it_is_listed() {
    let store = MemoryRecordStore::new();
    let service = QuotesService::new(Arc::new(store.clone()));

    // Replay a writer that stopped between the record write and the index
    // insert.
    store
        .put_record("quotes:7", &[("user_id", "1"), ("quote", "à moitié")])
        .await
        .expect("write record");

    assert!(service.list().await.expect("list").is_empty());

    service
        .update_text(QuoteId::new(7), "complétée")
        .await
        .expect("update unindexed quote");
    service
        .delete(QuoteId::new(7))
        .await
        .expect("delete unindexed quote");
}

#[tokio::test]
async fn a_dangling_index_entry_is_skipped_and_not_updatable() {
    let store = MemoryRecordStore::new();
    let service = QuotesService::new(Arc::new(store.clone()));

    // Replay a deletion that stopped before removing the index entry.
    store
        .index_add("quotes", "quotes:9")
        .await
        .expect("stage index entry");

    assert!(service.list().await.expect("list").is_empty());

    let err = service
        .update_text(QuoteId::new(9), "fantôme")
        .await
        .expect_err("update of a removed record");
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = service
        .delete(QuoteId::new(9))
        .await
        .expect_err("delete of a removed record");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creations_never_share_an_id() {
    let store = MemoryRecordStore::new();
    let service = Arc::new(QuotesService::new(Arc::new(store)));

    let tasks = (0..16).map(|n| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .add(&draft(&format!("citation {n}")))
                .await
                .expect("add")
        })
    });
    let mut ids: Vec<u64> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|handle| handle.expect("task").get())
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
}

#[tokio::test]
async fn an_unindexed_user_is_invisible_to_login_and_listing() {
    let store = MemoryRecordStore::new();
    let auth = AuthService::new(Arc::new(store.clone()), TokenSigner::new(SECRET));
    let directory = UserDirectory::new(Arc::new(store.clone()));

    // Record written but never indexed: readers must not find it.
    let ghost = User::new("5", "fantome", "invisible5");
    store
        .put_record(&user::user_key(ghost.id()), &ghost.record_fields())
        .await
        .expect("write record");

    let err = auth
        .login(&LoginCredentials::new("fantome", "invisible5"))
        .await
        .expect_err("login without index entry");
    assert_eq!(err.code, ErrorCode::Unauthorized);

    assert!(directory.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn listings_tolerate_both_window_shapes_at_once() {
    let store = MemoryRecordStore::new();
    let service = QuotesService::new(Arc::new(store.clone()));
    let id = service.add(&draft("entière")).await.expect("add");

    store
        .index_add("quotes", "quotes:50")
        .await
        .expect("stage dangling entry");
    store
        .put_record("quotes:51", &[("quote", "sans auteur")])
        .await
        .expect("stage partial record");
    store
        .index_add("quotes", "quotes:51")
        .await
        .expect("index partial record");

    let listed = service.list().await.expect("list");
    assert_eq!(listed, vec![Quote::new(id, "1", "entière")]);
}
