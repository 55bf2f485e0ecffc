//! # Cart Commands
//!
//! The cart view printed after every cart command.
//!
//! ## Cart View
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rocket-cart show                                                       │
//! │                                                                         │
//! │  #1  Tênis de Caminhada Leve Confortável    2 × R$ 179,90   R$ 359,80   │
//! │  #3  Tênis Adidas Duramo Lite 2.0           1 × R$ 219,90   R$ 219,90   │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  2 products, 3 items                                TOTAL   R$ 579,70   │
//! │                                                                         │
//! │  rocket-cart --json show → { "items": [...], "totals": {...} }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocket_core::{Cart, CartItem, CartTotals, Money};
use serde::Serialize;
use std::fmt::Write;

use crate::commands::OutputFormat;
use crate::error::AppResult;
use crate::state::AppConfig;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

/// A cart item with its line subtotal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub subtotal: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart
                .items()
                .iter()
                .map(|item| CartLine {
                    item: item.clone(),
                    subtotal: item.line_total(),
                })
                .collect(),
            totals: cart.totals(),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the cart as a text table or JSON.
pub fn render(cart: &Cart, config: &AppConfig, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&CartResponse::from(cart))?),
        OutputFormat::Text => Ok(render_text(cart, config)),
    }
}

fn render_text(cart: &Cart, config: &AppConfig) -> String {
    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let title_width = cart
        .items()
        .iter()
        .map(|item| item.product.title.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for item in cart.items() {
        let _ = writeln!(
            out,
            "#{:<4} {:<width$}  {:>3} × {:>12}  {:>12}",
            item.id(),
            item.product.title,
            item.amount,
            config.format_money(item.product.unit_price()),
            config.format_money(item.line_total()),
            width = title_width,
        );
    }

    let totals = cart.totals();
    let _ = write!(
        out,
        "{} product{}, {} item{}  TOTAL {}",
        totals.item_count,
        plural(totals.item_count as i64),
        totals.total_quantity,
        plural(totals.total_quantity),
        config.format_money(totals.subtotal),
    );
    out
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
