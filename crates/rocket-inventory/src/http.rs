//! # HTTP Inventory Client
//!
//! [`InventoryClient`] over reqwest.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stock(1)                                                               │
//! │    │                                                                    │
//! │    ├── endpoint(["stock", "1"]) ──► GET http://localhost:3333/stock/1   │
//! │    │                                                                    │
//! │    ├── 404          ──► NotFound { resource: "stock", id: "1" }         │
//! │    ├── non-2xx      ──► Status { status, url }                          │
//! │    ├── bad JSON     ──► Decode { url, source }                          │
//! │    └── 2xx + JSON   ──► StockInfo                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bodies are read as text and decoded with serde_json so a malformed body
//! is reported separately from a transport failure.

use reqwest::StatusCode;
use rocket_core::{Product, ProductId, StockInfo};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::client::{ClientConfig, InventoryClient};
use crate::error::{InventoryError, InventoryResult};

/// reqwest-backed inventory client. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpInventoryClient {
    /// Builds the underlying reqwest client from `config`.
    pub fn new(config: ClientConfig) -> InventoryResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("rocket-cart/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpInventoryClient {
            config,
            http: builder.build()?,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &'static str,
        id: String,
    ) -> InventoryResult<T> {
        debug!(url = %url, "GET");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(resource, id = %id, "Resource not found");
            return Err(InventoryError::NotFound { resource, id });
        }
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Inventory API error");
            return Err(InventoryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| InventoryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl InventoryClient for HttpInventoryClient {
    async fn stock(&self, id: ProductId) -> InventoryResult<StockInfo> {
        let id = id.to_string();
        let url = self.config.endpoint(&["stock", &id])?;
        self.get_json(url, "stock", id).await
    }

    async fn product(&self, id: ProductId) -> InventoryResult<Product> {
        let id = id.to_string();
        let url = self.config.endpoint(&["products", &id])?;
        self.get_json(url, "product", id).await
    }

    async fn products(&self) -> InventoryResult<Vec<Product>> {
        let url = self.config.endpoint(&["products"])?;
        self.get_json(url, "products", String::new()).await
    }
}
