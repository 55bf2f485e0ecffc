//! # Rocket Cart Library
//!
//! Everything behind the `rocket-cart` binary: the cart store, its
//! collaborators and the subcommands.
//!
//! ## Module Organization
//! ```text
//! rocket_cart_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore (writer lock + watch channel)
//! │   ├── notify.rs   ◄─── Notifier implementations
//! │   └── config.rs   ◄─── AppConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch
//! │   ├── cart.rs     ◄─── cart view (text / JSON)
//! │   ├── product.rs  ◄─── catalog
//! │   └── config.rs   ◄─── config show / init
//! └── error.rs        ◄─── StoreError, AppError
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use clap::Parser;
use rocket_inventory::HttpInventoryClient;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ConfigCommand};
use commands::OutputFormat;
use error::AppResult;
use state::{AppCartStore, AppConfig, CartStore, ConsoleNotifier};

/// Parses the command line, runs the command and picks the exit status.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Config ──────────────────────────────────────────────────────► │
/// │     • --config PATH or <config dir>/config.toml                         │
/// │     • ROCKET_* environment overrides, then validation                   │
/// │                                                                         │
/// │  3. Build CartStore ──────────────────────────────────────────────────► │
/// │     • HttpInventoryClient from [api]                                    │
/// │     • Storage from [storage] (memory with --ephemeral)                  │
/// │     • ConsoleNotifier (notices to stderr)                               │
/// │     • Cart restored from the snapshot                                   │
/// │                                                                         │
/// │  4. Run Command & Print ──────────────────────────────────────────────► │
/// │     • Exit 1 if a notice was raised or the command failed               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs a parsed command line.
pub async fn execute(cli: Cli) -> AppResult<ExitCode> {
    let format = OutputFormat::from_json_flag(cli.json);

    let command = match cli.command {
        Command::Config(ConfigCommand::Show) => {
            println!("{}", commands::config::show(cli.config)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Config(ConfigCommand::Init { force }) => {
            println!("{}", commands::config::init(cli.config, force)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Cart(command) => command,
    };

    let config = AppConfig::load(cli.config)?;
    let store = open_store(&config, cli.ephemeral, ConsoleNotifier::new()).await?;
    debug!(?command, "Running cart command");

    let output = commands::dispatch(&store, &config, command, format).await?;
    println!("{}", output);

    Ok(if store.notifier().raised() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Builds the cart store described by `config`.
pub async fn open_store<N: state::Notifier>(
    config: &AppConfig,
    ephemeral: bool,
    notifier: N,
) -> AppResult<AppCartStore<N>> {
    let inventory = HttpInventoryClient::new(config.client_config()?)?;
    let storage = config.open_storage(ephemeral).await?;
    debug!(backend = storage.backend_name(), "Opening cart store");

    Ok(CartStore::with_key(inventory, storage, notifier, config.storage.key.clone()).await)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=info` - Show committed cart changes
/// - `RUST_LOG=rocket_cart_lib=debug` - Per-operation detail
/// - Default: WARN (swallowed failures only)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
