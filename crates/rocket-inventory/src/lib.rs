//! # rocket-inventory: Inventory & Catalog Client
//!
//! Read-only client for the RocketShoes inventory API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Inventory API                                   │
//! │                                                                         │
//! │  GET /stock/{id}      → StockInfo { id, amount }                        │
//! │  GET /products/{id}   → Product { id, title, price, image }             │
//! │  GET /products        → [Product]                                       │
//! │                                                                         │
//! │  404 → InventoryError::NotFound                                         │
//! │  other non-2xx → InventoryError::Status                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`client`]: The [`InventoryClient`] trait and [`ClientConfig`]
//! - [`http`]: The reqwest-backed implementation
//! - [`error`]: Error types

pub mod client;
pub mod error;
pub mod http;

pub use client::{ClientConfig, InventoryClient};
pub use error::{InventoryError, InventoryResult};
pub use http::HttpInventoryClient;
