//! # App Error Types
//!
//! Two layers of errors live here.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Rocket Cart                            │
//! │                                                                         │
//! │  Cart operation (add / remove / update)                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  StoreResult<MutationOutcome>                                    │  │
//! │  │         │                                                        │  │
//! │  │  InventoryError ─┐                                               │  │
//! │  │  StorageError  ──┼──► StoreError ──► warn! ──► Notice ──► stderr │  │
//! │  │  CoreError     ──┘                                               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Startup / output (config, opening storage, catalog listing)            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  AppError ──► "error: ..." on stderr, exit status 1                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `StoreError` never reaches the user as text: the store logs it and raises
//! the operation's generic notice instead.

use rocket_core::{CoreError, ProductId};
use rocket_inventory::InventoryError;
use rocket_storage::StorageError;
use thiserror::Error;

/// Result type alias for cart store internals.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure inside a cart operation, before it is turned into a notice.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Inventory request failed: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Cart rejected the change: {0}")]
    Core(#[from] CoreError),

    /// The API answered a product lookup with a different product.
    #[error("Asked for product {requested}, received product {received}")]
    ProductMismatch {
        requested: ProductId,
        received: ProductId,
    },
}

/// Result type alias for app-level operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration loaded but failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// No home directory to derive config/data paths from.
    #[error("Could not determine app directories. Pass --config or set ROCKET_STORAGE_PATH.")]
    NoAppDirs,

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Failed to encode `--json` output.
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ConfigSaveFailed(err.to_string())
    }
}
