//! # App Configuration
//!
//! Where the inventory API lives, where the cart snapshot is stored and how
//! prices are shown.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ROCKET_*`)
//! 2. Config file (`config.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10          # optional, no timeout when absent
//!
//! [storage]
//! backend = "file"           # memory | file | sqlite
//! path = "/custom/cart"      # directory (file) or database file (sqlite)
//! key = "@RocketShoes:cart"
//!
//! [display]
//! currency_symbol = "R$"
//! decimal_separator = ","
//! ```
//!
//! ## Default Locations
//! - **Linux**: `~/.config/rocket-cart/config.toml`, data in
//!   `~/.local/share/rocket-cart/`
//! - **macOS**: `~/Library/Application Support/com.rocketshoes.rocket-cart/`
//! - **Windows**: `%APPDATA%\rocketshoes\rocket-cart\`

use directories::ProjectDirs;
use rocket_core::{Money, CART_STORAGE_KEY};
use rocket_inventory::client::DEFAULT_BASE_URL;
use rocket_inventory::ClientConfig;
use rocket_storage::{FileStore, MemoryStore, SqliteConfig, SqliteStore, Storage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// File name of the SQLite database inside the data directory.
const SQLITE_FILE_NAME: &str = "cart.db";

// =============================================================================
// Storage Backend
// =============================================================================

/// Which key-value store holds the cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Nothing survives the process.
    Memory,

    /// One JSON file per key in a directory.
    #[default]
    File,

    /// A `key_value` table in a SQLite database.
    Sqlite,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "ephemeral" => Ok(StorageBackend::Memory),
            "file" | "json" => Ok(StorageBackend::File),
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: memory, file, sqlite",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Inventory API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// API root, e.g. `http://localhost:3333`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Absent means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory (file backend) or database file (sqlite backend).
    /// Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Key the snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            path: None,
            key: default_storage_key(),
        }
    }
}

/// Price display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment and defaults, then
    /// validates it.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`AppConfig::load`], falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(AppError::NoAppDirs)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| AppError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        self.client_config()?;

        if self.storage.key.is_empty() {
            return Err(AppError::InvalidConfig(
                "storage.key must not be empty".into(),
            ));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(AppError::InvalidConfig(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `ROCKET_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API URL
        if let Some(url) = lookup("ROCKET_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        // Storage backend
        if let Some(backend) = lookup("ROCKET_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }

        // Storage path
        if let Some(path) = lookup("ROCKET_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        // Storage key
        if let Some(key) = lookup("ROCKET_STORAGE_KEY") {
            self.storage.key = key;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "rocketshoes", "rocket-cart")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Derived Settings
    // =========================================================================

    /// Inventory client settings from the `[api]` section.
    pub fn client_config(&self) -> AppResult<ClientConfig> {
        let config = ClientConfig::new(&self.api.base_url)
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        Ok(match self.api.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }

    /// Resolved location of the snapshot store.
    ///
    /// ## Returns
    /// - `None` for the memory backend
    /// - The configured `path`, or the data directory (file backend) or
    ///   `<data dir>/cart.db` (sqlite backend)
    pub fn storage_location(&self) -> AppResult<Option<PathBuf>> {
        if self.storage.backend == StorageBackend::Memory {
            return Ok(None);
        }
        if let Some(path) = &self.storage.path {
            return Ok(Some(path.clone()));
        }

        let dirs = Self::project_dirs().ok_or(AppError::NoAppDirs)?;
        let data_dir = dirs.data_dir();
        Ok(Some(match self.storage.backend {
            StorageBackend::Sqlite => data_dir.join(SQLITE_FILE_NAME),
            _ => data_dir.to_path_buf(),
        }))
    }

    /// Opens the configured store. `ephemeral` forces the memory backend.
    pub async fn open_storage(&self, ephemeral: bool) -> AppResult<Storage> {
        if ephemeral {
            debug!("Ephemeral run, using memory storage");
            return Ok(MemoryStore::new().into());
        }

        let storage = match (self.storage.backend, self.storage_location()?) {
            (StorageBackend::Memory, _) | (_, None) => MemoryStore::new().into(),
            (StorageBackend::File, Some(dir)) => FileStore::new(dir).into(),
            (StorageBackend::Sqlite, Some(path)) => {
                SqliteStore::new(SqliteConfig::new(path)).await?.into()
            }
        };

        info!(backend = %self.storage.backend, "Storage opened");
        Ok(storage)
    }

    /// Formats money with the configured symbol and separator.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(17990)), "R$ 179,90");
    /// ```
    pub fn format_money(&self, money: Money) -> String {
        money.format(
            &self.display.currency_symbol,
            self.display.decimal_separator,
        )
    }
}

/// Path shown by `config show` for a store location.
pub fn display_location(location: Option<&Path>) -> String {
    location
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string())
}
