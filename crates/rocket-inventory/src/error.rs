//! # Inventory Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Response      │  │     Transport           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidUrl     │  │  NotFound       │  │  Transport (reqwest)    │ │
//! │  │                 │  │  Status         │  │                         │ │
//! │  │                 │  │  Decode         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory client error.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Base URL couldn't be parsed or can't carry a path.
    #[error("Invalid inventory URL: {0}")]
    InvalidUrl(String),

    /// The API answered 404 for a resource.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// The API answered with a non-success status other than 404.
    #[error("Inventory API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The body wasn't the expected JSON shape.
    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Connection refused, DNS failure, timeout, TLS, etc.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<url::ParseError> for InventoryError {
    fn from(err: url::ParseError) -> Self {
        InventoryError::InvalidUrl(err.to_string())
    }
}

impl InventoryError {
    /// Whether this is the API saying the resource doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound { .. })
    }
}
