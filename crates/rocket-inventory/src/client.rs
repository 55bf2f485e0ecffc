//! # Inventory Client
//!
//! The seam the cart store talks through. The store only ever needs
//! `stock` and `product`; `products` backs the catalog listing.

use std::future::Future;
use std::time::Duration;

use rocket_core::{Product, ProductId, StockInfo};
use url::Url;

use crate::error::{InventoryError, InventoryResult};

/// Default API location (the json-server the storefront is developed
/// against).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Async read access to stock and product data.
pub trait InventoryClient: Send + Sync {
    /// Current stock for a product.
    fn stock(&self, id: ProductId) -> impl Future<Output = InventoryResult<StockInfo>> + Send;

    /// Product details.
    fn product(&self, id: ProductId) -> impl Future<Output = InventoryResult<Product>> + Send;

    /// The whole catalog.
    fn products(&self) -> impl Future<Output = InventoryResult<Vec<Product>>> + Send;
}

// =============================================================================
// Configuration
// =============================================================================

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root. Paths are appended as segments.
    pub base_url: Url,

    /// Per-request timeout. `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Parses `base_url`. Only `http` and `https` are accepted.
    pub fn new(base_url: &str) -> InventoryResult<Self> {
        let url = Url::parse(base_url)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InventoryError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                base_url
            )));
        }
        if url.cannot_be_a_base() {
            return Err(InventoryError::InvalidUrl(base_url.to_string()));
        }

        Ok(ClientConfig {
            base_url: url,
            timeout: None,
        })
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the URL for `segments` under the base path.
    ///
    /// `http://host/api` and `http://host/api/` both resolve
    /// `["stock", "1"]` to `http://host/api/stock/1`.
    pub fn endpoint(&self, segments: &[&str]) -> InventoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| InventoryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
