use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "trolley.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                base_url: "http://localhost:3333".to_string(),
                timeout_secs: 10,
            },
            storage: StorageConfig { path: PathBuf::from(".trolley") },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    catalog: Option<RawCatalog>,
    storage: Option<RawStorage>,
    logging: Option<RawLogging>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStorage {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Loads configuration by merging, in order: built-in defaults, the
    /// config file (explicit path or `trolley.toml` when present), then
    /// `TROLLEY_*` environment overrides. Validation runs last over the
    /// merged result.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = read_config_file(&options)? {
            config.apply_file(raw);
        }
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_file(&mut self, raw: RawConfig) {
        if let Some(catalog) = raw.catalog {
            if let Some(base_url) = catalog.base_url {
                self.catalog.base_url = base_url;
            }
            if let Some(timeout_secs) = catalog.timeout_secs {
                self.catalog.timeout_secs = timeout_secs;
            }
        }
        if let Some(storage) = raw.storage {
            if let Some(path) = storage.path {
                self.storage.path = path;
            }
        }
        if let Some(logging) = raw.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(base_url) = env::var("TROLLEY_CATALOG_BASE_URL") {
            self.catalog.base_url = base_url;
        }
        if let Ok(raw) = env::var("TROLLEY_CATALOG_TIMEOUT_SECS") {
            self.catalog.timeout_secs =
                raw.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: "TROLLEY_CATALOG_TIMEOUT_SECS".to_string(),
                    value: raw,
                })?;
        }
        if let Ok(path) = env::var("TROLLEY_STORAGE_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        if let Ok(level) = env::var("TROLLEY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(raw) = env::var("TROLLEY_LOG_FORMAT") {
            self.logging.format = match raw.as_str() {
                "compact" => LogFormat::Compact,
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: "TROLLEY_LOG_FORMAT".to_string(),
                        value: raw,
                    })
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.base_url.is_empty() {
            return Err(ConfigError::Validation("catalog.base_url must not be empty".into()));
        }
        if !self.catalog.base_url.starts_with("http://")
            && !self.catalog.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "catalog.base_url must be an http(s) URL, got `{}`",
                self.catalog.base_url
            )));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Validation("catalog.timeout_secs must be non-zero".into()));
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level `{}` is not a valid level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

fn read_config_file(options: &LoadOptions) -> Result<Option<RawConfig>, ConfigError> {
    let path = match &options.config_path {
        Some(path) => path.clone(),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };

    if !path.exists() {
        if options.require_file || options.config_path.is_some() {
            return Err(ConfigError::MissingConfigFile(path));
        }
        return Ok(None);
    }

    parse_config_file(&path).map(Some)
}

fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&contents)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}
