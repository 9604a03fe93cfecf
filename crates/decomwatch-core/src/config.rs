use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/decomwatch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomwatchConfig {
    /// Seconds between polls in `--watch` mode.
    pub watch_interval_secs: u64,
    /// Connect timeout for admin API requests, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for admin API requests, in seconds.
    pub request_timeout_secs: u64,
    /// Skip TLS certificate verification for `https` aliases.
    pub insecure_tls: bool,
    /// Directory holding the alias store `config.json` (None = `~/.mc`).
    #[serde(default)]
    pub mc_config_dir: Option<PathBuf>,
}

impl Default for DecomwatchConfig {
    fn default() -> Self {
        Self {
            watch_interval_secs: 10,
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            insecure_tls: true,
            mc_config_dir: None,
        }
    }
}

impl DecomwatchConfig {
    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("decomwatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DecomwatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DecomwatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DecomwatchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
