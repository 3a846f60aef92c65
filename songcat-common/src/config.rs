//! Bootstrap configuration
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments / their environment variables (`ConfigOverrides`)
//! 2. TOML configuration file
//! 3. Compiled defaults
//!
//! The TOML file itself is located via `--config`, then `SONGCAT_CONFIG`,
//! then `<config_dir>/songcat/config.toml`. A missing file is not an error:
//! the service starts on compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "SONGCAT_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// SQLite database file (defaults to the platform data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Interface to bind the HTTP listener to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// External metadata provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Base URL of the song info provider (required at startup)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Upper bound on one lookup round trip
    #[serde(default = "default_enrichment_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Upper bound on a single storage call
    #[serde(default = "default_storage_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_enrichment_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("songcat/{}", env!("CARGO_PKG_VERSION"))
}

fn default_storage_timeout_ms() -> u64 {
    5_000
}

fn default_max_connections() -> u32 {
    crate::db::DEFAULT_MAX_CONNECTIONS
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bind_address: default_bind_address(),
            port: default_port(),
            logging: LoggingConfig::default(),
            enrichment: EnrichmentConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_enrichment_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_storage_timeout_ms(),
            max_connections: default_max_connections(),
        }
    }
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Values supplied on the command line (or via their environment variables)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply command-line overrides on top of file/default values
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(path) = overrides.database_path {
            self.database_path = Some(path);
        }
        if let Some(url) = overrides.api_url {
            self.enrichment.base_url = Some(url);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }

    /// Database path, falling back to the platform data directory
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }

    /// Validated enrichment base URL
    pub fn enrichment_base_url(&self) -> Result<String> {
        match self.enrichment.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(Error::Config(format!(
                        "Enrichment base URL must start with http:// or https://: {}",
                        url
                    )));
                }
                Ok(url.trim_end_matches('/').to_string())
            }
            _ => Err(Error::Config(
                "Enrichment base URL not configured. Set one of:\n\
                 1. Command line: --api-url http://provider.example\n\
                 2. Environment: API_URL=http://provider.example\n\
                 3. TOML config: [enrichment] base_url = \"http://provider.example\""
                    .to_string(),
            )),
        }
    }
}

/// Locates and loads the bootstrap TOML file
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Config file location by priority: CLI, environment, platform default
    pub fn config_file_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        dirs::config_dir().map(|d| d.join("songcat").join("config.toml"))
    }

    /// Load the config file, or compiled defaults when there is none
    ///
    /// A file that exists but cannot be read or parsed is an error. The
    /// returned source is logged by the caller once tracing is up.
    pub fn load(&self) -> Result<(TomlConfig, ConfigSource)> {
        let Some(path) = self.config_file_path() else {
            return Ok((TomlConfig::default(), ConfigSource::Defaults { searched: None }));
        };

        if !path.exists() {
            return Ok((
                TomlConfig::default(),
                ConfigSource::Defaults {
                    searched: Some(path),
                },
            ));
        }

        let config = load_toml_file(&path)?;
        Ok((config, ConfigSource::File(path)))
    }
}

/// Where the bootstrap configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No file found; compiled defaults in use
    Defaults { searched: Option<PathBuf> },
}

/// Read and parse a TOML config file
pub fn load_toml_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    TomlConfig::from_toml_str(&content)
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("songcat").join("songcat.db"))
        .unwrap_or_else(|| PathBuf::from("./songcat.db"))
}
