//! Client configuration
//!
//! Read from `client.ron` in the platform config directory. Every field is
//! optional in the file; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::default_ledger_path;
use crate::progression::SummonerId;

const CONFIG_FILE: &str = "client.ron";

/// Config file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Summoner to open; the first summoner on the ledger when unset
    pub summoner: Option<SummonerId>,
    /// Ledger file override
    pub ledger_path: Option<PathBuf>,
    /// Directory holding codex RON overrides
    pub data_dir: Option<PathBuf>,
    /// Default `env_logger` filter
    pub log_filter: String,
    /// Seed for transaction hashes
    pub seed: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            summoner: None,
            ledger_path: None,
            data_dir: None,
            log_filter: "info".to_string(),
            seed: 0x5eed,
        }
    }
}

impl ClientConfig {
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_path.clone().unwrap_or_else(default_ledger_path)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets/data"))
    }
}

/// Default location of the config file
pub fn config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "summoner-skills", "SummonerSkills") {
        proj_dirs.config_dir().join(CONFIG_FILE)
    } else {
        PathBuf::from(CONFIG_FILE)
    }
}

/// Load the config; `Ok(None)` when the file does not exist
pub fn load_config(path: &Path) -> Result<Option<ClientConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(ron::from_str(&content)?))
}

/// Write the config, creating parent directories as needed
pub fn save_config(path: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let text = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?;
    fs::write(path, text)?;
    Ok(())
}
