//! # Config Commands
//!
//! `config show` prints the effective configuration (file + environment);
//! `config init` writes the defaults to the config file.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::state::{display_location, AppConfig};

/// Effective configuration as TOML, with the resolved locations as
/// comments on top.
pub fn show(config_path: Option<PathBuf>) -> AppResult<String> {
    let file = config_path.clone().or_else(AppConfig::default_config_path);
    let config = AppConfig::load(config_path)?;
    let store = match config.storage_location() {
        Ok(location) => display_location(location.as_deref()),
        Err(_) => "(no data directory)".to_string(),
    };

    Ok(format!(
        "# config file: {}\n# snapshot store: {}\n\n{}",
        display_location(file.as_deref()),
        store,
        toml::to_string_pretty(&config)?
    ))
}

/// Writes the default configuration. Refuses to overwrite unless `force`.
pub fn init(config_path: Option<PathBuf>, force: bool) -> AppResult<String> {
    let path = config_path
        .or_else(AppConfig::default_config_path)
        .ok_or(AppError::NoAppDirs)?;

    if path.exists() && !force {
        return Err(AppError::InvalidConfig(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let written = AppConfig::default().save(Some(path))?;
    Ok(format!("Wrote default config to {}", written.display()))
}
