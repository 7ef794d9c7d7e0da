use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use serde::Deserialize;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "ember.toml";
const DATA_ENV_VAR: &str = "EMBER_DATA";
const CONFIG_ENV_VAR: &str = "EMBER_CONFIG";
const DEFAULT_DATA_DIR: &str = ".ember";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    data: Option<String>,
    storage: Option<StorageSection>,
}

#[derive(Debug, Deserialize)]
struct StorageSection {
    location: Option<String>,
}

impl Config {
    /// The configured data location, whether given top-level or under
    /// `[storage]`.
    pub fn data_location(&self) -> Option<&str> {
        self.data.as_deref().or_else(|| {
            self.storage
                .as_ref()
                .and_then(|section| section.location.as_deref())
        })
    }
}

/// Resolution order: explicit override, `EMBER_DATA`, the config file
/// (`EMBER_CONFIG` or `./ember.toml`), then `~/.ember`.
#[tracing::instrument(skip(override_dir))]
pub fn resolve_data_dir(override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = override_dir {
        return Ok(path.to_path_buf());
    }

    if let Ok(raw) = std::env::var(DATA_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            debug!(source = DATA_ENV_VAR, dir = trimmed, "data dir from environment");
            return Ok(expand_tilde(Path::new(trimmed)));
        }
    }

    if let Some(path) = config_file_path()
        && let Some(location) = load_config_location(&path)
    {
        return Ok(expand_tilde(Path::new(&location)));
    }

    default_data_dir()
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    std::env::current_dir().ok().map(|dir| dir.join(CONFIG_FILE))
}

fn load_config_location(path: &Path) -> Option<String> {
    if !path.exists() {
        debug!(file = %path.display(), "config file not found");
        return None;
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                file = %path.display(),
                error = %err,
                "failed reading config file"
            );
            return None;
        }
    };

    let parsed = match toml::from_str::<Config>(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                file = %path.display(),
                error = %err,
                "failed parsing config file"
            );
            return None;
        }
    };

    let location = parsed.data_location().map(str::to_string);
    match &location {
        Some(dir) => info!(file = %path.display(), dir = %dir, "configured data location"),
        None => debug!(file = %path.display(), "config file had no data location"),
    }
    location
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(home.join(DEFAULT_DATA_DIR))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
