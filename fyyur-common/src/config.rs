//! Configuration loading
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! A missing or unreadable config file never stops startup; it is logged
//! and the remaining tiers apply.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{Error, Result};

/// Compiled defaults used when no other source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            database_path: default_data_dir().join("fyyur.db"),
            bind_address: "127.0.0.1:5000".to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// `[logging]` section of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Load a config file, degrading to an empty config on any failure
    pub fn load_or_default(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Config file {} not readable ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct FyyurConfig {
    pub database_path: PathBuf,
    pub bind_address: SocketAddr,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl FyyurConfig {
    /// Resolve configuration from overrides, the config file and defaults
    ///
    /// Only an unparseable bind address is fatal.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let file_config = match overrides.config_file.clone().or_else(default_config_file) {
            Some(path) if path.exists() => TomlConfig::load_or_default(&path),
            Some(path) => {
                warn!("Config file not found: {}", path.display());
                TomlConfig::default()
            }
            None => TomlConfig::default(),
        };

        Self::merge(overrides, file_config, CompiledDefaults::for_current_platform())
    }

    /// Merge the three tiers without touching the filesystem
    pub fn merge(
        overrides: ConfigOverrides,
        file_config: TomlConfig,
        defaults: CompiledDefaults,
    ) -> Result<Self> {
        let bind_address = overrides
            .bind_address
            .or(file_config.bind_address)
            .unwrap_or(defaults.bind_address);
        let bind_address: SocketAddr = bind_address
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind_address, e)))?;

        Ok(Self {
            database_path: overrides
                .database_path
                .or(file_config.database_path)
                .unwrap_or(defaults.database_path),
            bind_address,
            log_level: overrides
                .log_level
                .or(file_config.logging.level)
                .unwrap_or(defaults.log_level),
            log_file: overrides
                .log_file
                .or(file_config.logging.file)
                .or(defaults.log_file),
        })
    }
}

/// Default config file location: `<config_dir>/fyyur/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"))
}

/// OS-dependent data directory for the database
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
}
