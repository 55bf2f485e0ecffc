//! # Notices
//!
//! Messages shown to the shopper when a cart operation does not go through.
//! Cart operations never return errors to their callers; they raise exactly
//! one of these instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A user-facing message raised by a cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The requested quantity exceeds the available stock.
    OutOfStock,
    /// Adding a product failed (inventory or storage error).
    AddFailed,
    /// The product to remove is not in the cart, or the removal failed.
    RemoveFailed,
    /// Changing a quantity failed (inventory or storage error).
    UpdateFailed,
}

impl Notice {
    /// Text handed to the notifier.
    pub const fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "Requested quantity out of stock",
            Notice::AddFailed => "Error adding product",
            Notice::RemoveFailed => "Error removing product",
            Notice::UpdateFailed => "Error changing product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
