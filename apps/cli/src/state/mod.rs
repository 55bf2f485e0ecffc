//! # State Module
//!
//! Long-lived objects a command works with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │   CartStore<I, S, N>     │  │   Notifier   │  │    AppConfig     │  │
//! │  │                          │  │              │  │                  │  │
//! │  │  writer: Mutex<()>       │  │  error(msg)  │  │  [api]           │  │
//! │  │  current: watch<Arc<Cart>│  │              │  │  [storage]       │  │
//! │  │  inventory, storage      │  │              │  │  [display]       │  │
//! │  └──────────────────────────┘  └──────────────┘  └──────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: one writer at a time, readers take the latest Arc<Cart> │
//! │  • Notifier: Send + Sync, called from inside the writer lock          │
//! │  • AppConfig: read-only after loading                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod notify;

pub use cart::{CartStore, MutationOutcome};
pub use config::{
    display_location, ApiSettings, AppConfig, DisplaySettings, StorageBackend, StorageSettings,
};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier, TracingNotifier};

use rocket_inventory::HttpInventoryClient;
use rocket_storage::Storage;

/// The store as the CLI wires it.
pub type AppCartStore<N> = CartStore<HttpInventoryClient, Storage, N>;
