// Generator configuration.
//
// Default location: `~/.scriptcast/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app::AppName;
use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
/// Custom scripts directory, relative to the working directory.
pub const DEFAULT_SCRIPTS_PATH: &str = "scripts";

/// Root directory for scriptcast state: `~/.scriptcast/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".scriptcast"))
}

/// Path to the config file: `~/.scriptcast/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

/// Immutable input to every script generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Listener host embedded in broadcast fragments.
    pub host: String,
    /// Listener port embedded in broadcast fragments.
    pub port: u16,
    /// Directory holding user-supplied command scripts.
    pub scripts_path: PathBuf,
    /// Directory holding bundled scripts, one subdirectory per app.
    pub builtin_scripts_path: Option<PathBuf>,
    pub app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            scripts_path: PathBuf::from(DEFAULT_SCRIPTS_PATH),
            builtin_scripts_path: None,
            app: AppConfig::default(),
        }
    }
}

impl Config {
    /// Load from `~/.scriptcast/config.toml`. Returns defaults if the file
    /// doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        match global_config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Built-in scripts root: configured path, else `scripts/` beside the executable.
    pub fn builtin_scripts_dir(&self) -> PathBuf {
        self.builtin_scripts_path.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.join("scripts")))
                .unwrap_or_else(|| PathBuf::from("scripts"))
        })
    }
}

/// Target application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub name: AppName,
    /// Directory the host application picks generated scripts up from.
    pub adobe_scripts_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { name: AppName::Photoshop, adobe_scripts_path: None }
    }
}

impl AppConfig {
    /// Output directory: configured path, else `~/.scriptcast/adobe-scripts`.
    pub fn adobe_scripts_dir(&self) -> PathBuf {
        self.adobe_scripts_path.clone().unwrap_or_else(|| {
            global_dir()
                .map(|d| d.join("adobe-scripts"))
                .unwrap_or_else(|| PathBuf::from("adobe-scripts"))
        })
    }
}
