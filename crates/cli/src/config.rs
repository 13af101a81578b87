//! Configuration file lookup

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xmlmap::Config;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = directories::ProjectDirs::from("com", "xmlmap", "xmlmap")
        .context("Could not determine config directory")?
        .config_dir()
        .to_path_buf();

    Ok(config_dir)
}

/// Get the default config file path
pub fn config_file_path() -> Result<PathBuf> {
    let mut path = config_dir()?;
    path.push("config.toml");
    Ok(path)
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the user config file is used if
/// present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(Some(path))
            .with_context(|| format!("Failed to load config file: {:?}", path));
    }

    let default_path = match config_file_path() {
        Ok(path) => path,
        Err(_) => return Ok(Config::default()),
    };

    if !default_path.exists() {
        return Ok(Config::default());
    }

    Config::load(Some(&default_path))
        .with_context(|| format!("Failed to load config file: {:?}", default_path))
}
