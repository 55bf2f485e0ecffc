//! # rocket-core: Pure Cart Logic for Rocket Cart
//!
//! Everything the cart store needs to reason about a cart without touching
//! the network or the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rocket Cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 rocket-cart CLI / storefront UI                 │   │
//! │  │      catalog ──► add ──► update/increment ──► remove            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                CartStore (apps/cli state)                       │   │
//! │  └──────┬──────────────────────┬──────────────────────┬────────────┘   │
//! │         │                      │                      │                 │
//! │  ┌──────▼───────┐   ┌──────────▼──────────┐   ┌───────▼──────────┐     │
//! │  │ ★ rocket-core│   │  rocket-inventory   │   │  rocket-storage  │     │
//! │  │  Cart, Money │   │  stock / product    │   │  snapshot KV     │     │
//! │  │  Notice      │   │  over HTTP          │   │  memory/file/SQL │     │
//! │  └──────────────┘   └─────────────────────┘   └──────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Product, CartItem, StockInfo, AmountUpdate)
//! - [`cart`] - The Cart value and its copy-on-write operations
//! - [`money`] - Integer money for totals
//! - [`notice`] - User-facing notices raised by cart operations
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rocket_core::{Cart, CartItem, Product};
//!
//! let sneaker = Product {
//!     id: 1,
//!     title: "Tênis de Caminhada Leve Confortável".to_string(),
//!     price: 179.9,
//!     image: "https://example.com/1.jpg".to_string(),
//! };
//!
//! let cart = Cart::new().with_item(CartItem::from_product(sneaker, 1)).unwrap();
//! assert_eq!(cart.totals().subtotal.cents(), 17990);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod notice;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use notice::Notice;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot lives under.
///
/// Shared with the storefront web client, so changing it orphans every cart
/// persisted so far.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";
