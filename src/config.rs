//! Configuration loading and layering.
//!
//! Settings come from three layers, weakest first: built-in defaults, an
//! optional TOML configuration file, and command-line overrides. The result
//! is a single owned [`Config`] passed into the pipeline; there is no
//! global configuration state.
//!
//! # Configuration File Format
//!
//! ```toml
//! cache_dir = "/home/player/.ut2004/Cache"
//! target_dir = "/home/player/.ut2004"
//! backups = 5
//! auto_confirm = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of index backups to keep.
pub const DEFAULT_BACKUPS: i32 = 5;

/// Configuration file looked up in the working directory.
const LOCAL_CONFIG_FILE: &str = "utcachex.toml";

/// Errors that can occur during configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read from a configuration file. Every field is optional so a
/// partial file only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    #[serde(default)]
    pub target_dir: Option<PathBuf>,

    /// Backup retention count: -1 keeps everything, 0 keeps nothing.
    #[serde(default)]
    pub backups: Option<i32>,

    /// Answer every prompt with the preset `yes`.
    #[serde(default)]
    pub auto_confirm: Option<bool>,
}

impl FileConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file (it must exist)
    /// 2. Look for `utcachex.toml` in the current directory
    /// 3. Look for `~/.config/utcachex/config.toml` in the home directory
    /// 4. Fall back to an empty configuration (defaults only)
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("utcachex")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

/// Command-line values layered on top of the file configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cache_dir: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub backups: Option<i32>,
    pub auto_confirm: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Staging folder holding the downloaded files and the index file.
    pub cache_dir: PathBuf,
    /// Destination root containing the category subdirectories.
    pub target_dir: PathBuf,
    /// Backup retention count (-1 unlimited, 0 none).
    pub backups: i32,
    /// Answer prompts automatically with `yes`.
    pub auto_confirm: bool,
}

impl Config {
    /// Layers command-line overrides over file values over defaults.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            cache_dir: overrides
                .cache_dir
                .or(file.cache_dir)
                .unwrap_or_else(|| home_dir().join(".ut2004").join("Cache")),
            target_dir: overrides
                .target_dir
                .or(file.target_dir)
                .unwrap_or_else(|| home_dir().join(".ut2004")),
            backups: overrides
                .backups
                .or(file.backups)
                .unwrap_or(DEFAULT_BACKUPS),
            auto_confirm: overrides.auto_confirm || file.auto_confirm.unwrap_or(false),
        }
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
