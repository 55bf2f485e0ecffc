//! # Error Types
//!
//! Domain error types for rocket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocket-core        CoreError       - cart invariants, snapshot decode  │
//! │  rocket-storage     StorageError    - key-value reads/writes            │
//! │  rocket-inventory   InventoryError  - stock/catalog requests            │
//! │  apps/cli           StoreError      - one failed cart operation         │
//! │                     AppError        - CLI startup and commands          │
//! │                                                                         │
//! │  Cart operations stop every error at their boundary and turn it into   │
//! │  a Notice for the shopper.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

/// Core cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A second line for a product already in the cart.
    #[error("Product {product_id} is already in the cart")]
    DuplicateItem { product_id: ProductId },

    /// A line whose quantity is below one.
    #[error("Product {product_id} has invalid amount {amount}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// Snapshot text is not a JSON array of cart items.
    #[error("Invalid cart snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
