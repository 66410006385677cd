use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV, CONFIG_FILE, ConsoleConfig};

/// Loads the console config from `$COMPARTMENT_STORE_CONFIG` or
/// `storage.ron`, falling back to defaults when the file does not exist.
pub fn load_config() -> Result<ConsoleConfig> {
    let path = env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ConsoleConfig> {
    let config = match fs::read_to_string(path) {
        Ok(content) => ron::from_str(&content)
            .with_context(|| format!("malformed config {}", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => ConsoleConfig::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("cannot read config {}", path.display()));
        }
    };
    config.validate()?;
    Ok(config)
}
