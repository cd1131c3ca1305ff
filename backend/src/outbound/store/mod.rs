//! Record store adapters.
//!
//! Production traffic goes through [`RedisRecordStore`]; tests and local
//! experiments use [`MemoryRecordStore`], which honours the same per-call
//! atomicity contract.

mod memory;
mod redis;

pub use memory::MemoryRecordStore;
pub use redis::{RedisRecordStore, StorePool, StorePoolConfig};
