//! # Domain Types
//!
//! Wire types shared by the inventory API, the cart store and the persisted
//! snapshot.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │   StockInfo     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  (Product)      │   │  id             │       │
//! │  │  title          │   │  amount         │   │  amount         │       │
//! │  │  price          │   └─────────────────┘   └─────────────────┘       │
//! │  │  image          │                                                    │
//! │  └─────────────────┘   GET /products/:id       GET /stock/:id          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! A `CartItem` serializes flat, exactly like the catalog product with an
//! extra `amount` field:
//! ```json
//! { "id": 1, "title": "Tênis", "price": 179.9, "image": "https://...", "amount": 2 }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// Catalog metadata for a product, as returned by `GET /products/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price in major currency units, as sent by the API.
    pub price: f64,

    /// Product image URL.
    pub image: String,
}

impl Product {
    /// Unit price rounded to whole cents.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_decimal_price(self.price)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product placed in the cart together with its quantity.
///
/// The product metadata is frozen at the time it was added; later catalog
/// changes do not reach items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub product: Product,

    /// Quantity in the cart, always >= 1.
    #[ts(type = "number")]
    pub amount: i64,
}

impl CartItem {
    /// Places a catalog product in the cart with the given quantity.
    pub fn from_product(product: Product, amount: i64) -> Self {
        CartItem { product, amount }
    }

    /// Product identifier of this line.
    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Returns a copy of this line carrying a different quantity.
    pub fn with_amount(&self, amount: i64) -> Self {
        CartItem {
            product: self.product.clone(),
            amount,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.unit_price() * self.amount
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Units available for a product, as returned by `GET /stock/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockInfo {
    pub id: ProductId,

    #[ts(type = "number")]
    pub amount: i64,
}

impl StockInfo {
    /// True when no unit can be sold at all.
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.amount <= 0
    }

    /// True when `requested` units fit in the available stock.
    #[inline]
    pub fn covers(&self, requested: i64) -> bool {
        self.amount >= requested
    }
}

// =============================================================================
// Amount Update
// =============================================================================

/// Request to set the quantity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AmountUpdate {
    pub product_id: ProductId,

    #[ts(type = "number")]
    pub amount: i64,
}

impl AmountUpdate {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        AmountUpdate { product_id, amount }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
