//! # rocket-storage: Key-Value Persistence for Rocket Cart
//!
//! The persistence substrate behind the cart snapshot. Values are opaque
//! strings stored under string keys; the cart store writes its whole
//! snapshot under a single key on every successful mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rocket Cart Data Flow                            │
//! │                                                                         │
//! │  CartStore::add_product(..)                                            │
//! │       │  storage.set("@RocketShoes:cart", "[{...}]")                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   rocket-storage (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌───────────────┐  ┌──────────────────┐   │   │
//! │  │   │  MemoryStore  │  │   FileStore   │  │   SqliteStore    │   │   │
//! │  │   │  (HashMap)    │  │ one file/key  │  │ key_value table  │   │   │
//! │  │   └───────────────┘  └───────────────┘  └──────────────────┘   │   │
//! │  │              ▲               ▲                  ▲               │   │
//! │  │              └───────── Storage (enum) ─────────┘               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`KeyValueStore`] trait and the [`Storage`] dispatcher
//! - [`memory`] - In-process store
//! - [`file`] - Directory-backed store
//! - [`sqlite`] - SQLite pool and store
//! - [`migrations`] - Embedded SQLite migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocket_storage::{KeyValueStore, SqliteConfig, SqliteStore};
//!
//! let store = SqliteStore::new(SqliteConfig::new("cart.db")).await?;
//! store.set("@RocketShoes:cart", "[]").await?;
//! assert_eq!(store.get("@RocketShoes:cart").await?.as_deref(), Some("[]"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::{SqliteConfig, SqliteStore};
pub use store::{KeyValueStore, Storage};
