//! # Cart
//!
//! The cart value and its copy-on-write operations.
//!
//! ## Copy-on-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Change Builds a New Cart                       │
//! │                                                                         │
//! │  cart v1 ──► with_item(..)   ──► cart v2   (v1 untouched)              │
//! │  cart v2 ──► with_amount(..) ──► cart v3   (new CartItem, v2 untouched) │
//! │  cart v3 ──► without(..)     ──► cart v4                                │
//! │                                                                         │
//! │  Readers holding an older version keep seeing exactly what they read. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by product id
//! - Every amount is >= 1
//!
//! Both are checked by [`Cart::from_snapshot`] and preserved by every
//! operation here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, ProductId};

/// The shopping cart: an ordered list of items, unique by product id.
///
/// Serializes as a bare JSON array of items, which is the snapshot format.
/// Decoding goes through [`Cart::from_snapshot`] so the invariants are
/// always checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from items, checking both invariants.
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount < 1 {
                return Err(CoreError::InvalidAmount {
                    product_id: item.id(),
                    amount: item.amount,
                });
            }
            if !seen.insert(item.id()) {
                return Err(CoreError::DuplicateItem {
                    product_id: item.id(),
                });
            }
        }
        Ok(Cart { items })
    }

    /// Decodes a persisted snapshot.
    pub fn from_snapshot(snapshot: &str) -> CoreResult<Self> {
        let items: Vec<CartItem> = serde_json::from_str(snapshot)?;
        Self::from_items(items)
    }

    /// Encodes the cart as a persisted snapshot.
    pub fn to_snapshot(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Finds the line for a product.
    pub fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Returns a new cart with `item` appended.
    pub fn with_item(&self, item: CartItem) -> CoreResult<Self> {
        if item.amount < 1 {
            return Err(CoreError::InvalidAmount {
                product_id: item.id(),
                amount: item.amount,
            });
        }
        if self.contains(item.id()) {
            return Err(CoreError::DuplicateItem {
                product_id: item.id(),
            });
        }

        let mut items = self.items.clone();
        items.push(item);
        Ok(Cart { items })
    }

    /// Returns a new cart without the product's line, or `None` if the
    /// product is not in the cart.
    pub fn without(&self, product_id: ProductId) -> Option<Self> {
        if !self.contains(product_id) {
            return None;
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();
        Some(Cart { items })
    }

    /// Returns a new cart where the product's line carries `amount`.
    ///
    /// The line is replaced by a fresh [`CartItem`]; its position is kept.
    /// `Ok(None)` means the product is not in the cart.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> CoreResult<Option<Self>> {
        if amount < 1 {
            return Err(CoreError::InvalidAmount { product_id, amount });
        }
        if !self.contains(product_id) {
            return Ok(None);
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id() == product_id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok(Some(Cart { items }))
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.amount))
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Quantity in cart per product, for catalog badges.
    pub fn amounts_by_product(&self) -> BTreeMap<ProductId, i64> {
        self.items
            .iter()
            .map(|item| (item.id(), item.amount))
            .collect()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
