//! # Product Commands
//!
//! Catalog listing with the quantity of each product already in the cart.

use rocket_core::{Product, ProductId};
use rocket_inventory::InventoryClient;
use rocket_storage::KeyValueStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::debug;

use crate::commands::OutputFormat;
use crate::error::AppResult;
use crate::state::{AppConfig, CartStore, Notifier};

/// A catalog product as shown in the listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub product: Product,

    /// Unit price formatted with the configured currency.
    pub price_formatted: String,

    /// Quantity of this product in the cart (0 when absent).
    pub in_cart: i64,
}

impl CatalogEntry {
    fn new(product: Product, in_cart: &BTreeMap<ProductId, i64>, config: &AppConfig) -> Self {
        CatalogEntry {
            price_formatted: config.format_money(product.unit_price()),
            in_cart: in_cart.get(&product.id).copied().unwrap_or(0),
            product,
        }
    }
}

/// Lists the catalog.
///
/// ## Errors
/// Any inventory failure aborts the command; the catalog is read-only so
/// there is no notice for it.
pub async fn catalog<I, S, N>(
    store: &CartStore<I, S, N>,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<String>
where
    I: InventoryClient,
    S: KeyValueStore,
    N: Notifier,
{
    let products = store.inventory().products().await?;
    debug!(count = products.len(), "Fetched catalog");

    let in_cart = store.cart().amounts_by_product();
    let entries: Vec<CatalogEntry> = products
        .into_iter()
        .map(|product| CatalogEntry::new(product, &in_cart, config))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => Ok(render_text(&entries)),
    }
}

fn render_text(entries: &[CatalogEntry]) -> String {
    if entries.is_empty() {
        return "No products available".to_string();
    }

    let title_width = entries
        .iter()
        .map(|e| e.product.title.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "#{:<4} {:<width$}  {:>12}",
            entry.product.id,
            entry.product.title,
            entry.price_formatted,
            width = title_width,
        );
        if entry.in_cart > 0 {
            let _ = write!(out, "  [{} in cart]", entry.in_cart);
        }
    }
    out
}
