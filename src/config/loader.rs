// Configuration loader
// Loads settings from ~/.zerotier-state/config.toml, then applies environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{CONFIG_DIR, ENV_API_KEY, ENV_CLI_PATH};
use super::settings::Config;

/// Default location of the config file, if a home directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join("config.toml"))
}

/// Load configuration from the default path and the process environment
pub fn load_config() -> Result<Config> {
    load_config_from(None)
}

/// Load configuration from `path` (or the default path) and the process environment.
///
/// An explicitly given path must exist. A missing default file just means defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => match default_config_path() {
            Some(default) if default.exists() => read_config_file(&default)?,
            _ => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        config.api_key = Some(key);
    }
    if let Some(cli) = lookup(ENV_CLI_PATH).filter(|v| !v.trim().is_empty()) {
        config.cli_path = cli;
    }
    config
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}
