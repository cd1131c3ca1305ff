//! Ports define the boundary between the domain and its adapters.

pub mod record_store;

pub use record_store::{RecordStore, StoreError};
