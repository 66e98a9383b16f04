use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::transfer::TransferOptions;

/// Global configuration loaded from `~/.config/mfetch/config.toml`.
///
/// Only transfer and interaction knobs live here; the model's mirrors, target
/// path and expected size are fixed by `ModelAsset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Overwrite an LFS placeholder without asking.
    #[serde(default)]
    pub auto_confirm: bool,
    /// Print `Progress: N%` while downloading.
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
    /// Optional connect timeout in seconds (None = no timeout beyond libcurl's default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional redirect cap (None = libcurl default).
    #[serde(default)]
    pub max_redirections: Option<u32>,
}

fn default_show_progress() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            auto_confirm: false,
            show_progress: true,
            connect_timeout_secs: None,
            max_redirections: None,
        }
    }
}

impl FetchConfig {
    /// Curl handle options derived from this config.
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            max_redirections: self.max_redirections,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
