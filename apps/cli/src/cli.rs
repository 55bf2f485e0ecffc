//! Command-line interface definition.

use clap::{Parser, Subcommand};
use rocket_core::ProductId;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rocket-cart")]
#[command(author, version, about = "Shopping cart for the RocketShoes storefront")]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the cart in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Cart(CartCommand),

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Commands that work on the cart store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// List products with the quantity already in the cart
    Catalog,

    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Set the quantity of a product in the cart
    Update {
        /// Product id
        id: ProductId,

        /// New quantity (0 or less does nothing)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Raise the quantity by one
    Increment {
        /// Product id
        id: ProductId,
    },

    /// Lower the quantity by one (never below 1)
    Decrement {
        /// Product id
        id: ProductId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
