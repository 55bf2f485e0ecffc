//! # Commands Module
//!
//! What each subcommand does once the store is built.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch, output format)
//! ├── cart.rs     ◄─── cart view (text table / JSON)
//! ├── product.rs  ◄─── catalog listing
//! └── config.rs   ◄─── config show / init
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  rocket-cart add 3                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(store, config, CartCommand::Add { id: 3 }, format)            │
//! │         │                                                               │
//! │         ├── store.add_product(3)  ──► notice? ──► Notifier (stderr)    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  cart::render(store.cart())  ──► stdout (text table or JSON)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations always print the cart afterwards, changed or not.

pub mod cart;
pub mod config;
pub mod product;

use rocket_core::AmountUpdate;
use rocket_inventory::InventoryClient;
use rocket_storage::KeyValueStore;

use crate::cli::CartCommand;
use crate::error::AppResult;
use crate::state::{AppConfig, CartStore, Notifier};

/// How command output is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Runs a cart command against `store` and returns what to print.
pub async fn dispatch<I, S, N>(
    store: &CartStore<I, S, N>,
    config: &AppConfig,
    command: CartCommand,
    format: OutputFormat,
) -> AppResult<String>
where
    I: InventoryClient,
    S: KeyValueStore,
    N: Notifier,
{
    match command {
        CartCommand::Show => {}
        CartCommand::Catalog => return product::catalog(store, config, format).await,
        CartCommand::Add { id } => {
            store.add_product(id).await;
        }
        CartCommand::Remove { id } => {
            store.remove_product(id).await;
        }
        CartCommand::Update { id, amount } => {
            store
                .update_product_amount(AmountUpdate::new(id, amount))
                .await;
        }
        CartCommand::Increment { id } => {
            store.adjust_product_amount(id, 1).await;
        }
        CartCommand::Decrement { id } => {
            store.adjust_product_amount(id, -1).await;
        }
    }

    cart::render(&store.cart(), config, format)
}
