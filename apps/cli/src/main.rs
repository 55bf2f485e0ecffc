//! # Rocket Cart Entry Point
//!
//! ```text
//! rocket-cart [--config PATH] [--ephemeral] [--json] <COMMAND>
//! ```
//!
//! The actual setup is in lib.rs so tests can drive it.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    rocket_cart_lib::run().await
}
