//! # Key-Value Store
//!
//! The seam between the cart store and whatever holds its snapshot.
//!
//! ## Contract
//! - `get` of a key never written returns `Ok(None)`
//! - `set` replaces the whole value (no merge, no append)
//! - values are opaque text; the store never parses them

use std::future::Future;

use crate::error::StorageResult;
use crate::file::FileStore;
use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;

/// Async key-value storage for text values.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    /// Overwrites the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;
}

/// A store chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum Storage {
    Memory(MemoryStore),
    File(FileStore),
    Sqlite(SqliteStore),
}

impl Storage {
    /// Short backend name for logs.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Memory(_) => "memory",
            Storage::File(_) => "file",
            Storage::Sqlite(_) => "sqlite",
        }
    }
}

impl KeyValueStore for Storage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Storage::Memory(store) => store.get(key).await,
            Storage::File(store) => store.get(key).await,
            Storage::Sqlite(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Storage::Memory(store) => store.set(key, value).await,
            Storage::File(store) => store.set(key, value).await,
            Storage::Sqlite(store) => store.set(key, value).await,
        }
    }
}

impl From<MemoryStore> for Storage {
    fn from(store: MemoryStore) -> Self {
        Storage::Memory(store)
    }
}

impl From<FileStore> for Storage {
    fn from(store: FileStore) -> Self {
        Storage::File(store)
    }
}

impl From<SqliteStore> for Storage {
    fn from(store: SqliteStore) -> Self {
        Storage::Sqlite(store)
    }
}
