use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_DIR: &str = "CLIP_PLAYER_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File path or http(s) URL of the clip to open.
    #[serde(default)]
    pub source: String,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_ui_fps")]
    pub ui_fps: u32,

    #[serde(default = "default_time_update_ms")]
    pub time_update_ms: u64,

    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: f64,

    #[serde(default)]
    pub transparent_background: bool,
}

fn default_theme() -> String {
    "mocha".to_string()
}

fn default_ui_fps() -> u32 {
    60
}

fn default_time_update_ms() -> u64 {
    250
}

fn default_seek_step_secs() -> f64 {
    5.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: String::new(),
            theme: default_theme(),
            ui_fps: default_ui_fps(),
            time_update_ms: default_time_update_ms(),
            seek_step_secs: default_seek_step_secs(),
            transparent_background: false,
        }
    }
}

impl Config {
    /// Loads the user config, writing the defaults out on first run.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            let cfg = Self::default();
            if let Err(e) = cfg.save_to(&path) {
                log::warn!("cannot write default config: {e:#}");
            }
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        match toml::from_str(&raw) {
            Ok(cfg) => Ok(cfg),
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {e}", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("mkdir {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("write {}", path.display()))
    }

    pub fn default_path() -> PathBuf {
        config_root().join("config.toml")
    }
}

fn config_root() -> PathBuf {
    if let Some(p) = std::env::var_os(ENV_CONFIG_DIR) {
        return PathBuf::from(p);
    }
    // Linux: $XDG_CONFIG_HOME/clip-player
    // macOS: ~/Library/Application Support/clip-player
    // Windows: %APPDATA%\clip-player
    BaseDirs::new()
        .map(|d| d.config_dir().join("clip-player"))
        .unwrap_or_else(|| PathBuf::from(".config/clip-player"))
}
