use serde::{Deserialize, Serialize};

use super::ai::{AiConfig, AI_API_KEY_ENV};
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::scraper::ScraperConfig;
use super::server::ServerConfig;
use super::storage::StorageConfig;
use super::system::SystemConfig;

const LOCAL_CONFIG_PATH: &str = "servicedex.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/servicedex/config.toml";

/// Main configuration structure for Servicedex
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP API configuration (port, bind address, CORS origin)
    #[serde(default)]
    pub server: ServerConfig,

    /// Service list cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Web-scrape metadata lookup
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// AI-assisted metadata lookup
    #[serde(default)]
    pub ai: AiConfig,

    /// Metadata file and audit log locations
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. servicedex.toml in current directory
    /// 3. /etc/servicedex/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.apply_env_credential(std::env::var(AI_API_KEY_ENV).ok());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.metadata_path {
            self.storage.metadata_path = path;
        }
        if let Some(path) = overrides.audit_log_path {
            self.storage.audit_log_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Fill the AI credential from the environment when the file has none.
    pub fn apply_env_credential(&mut self, env_key: Option<String>) {
        if self.ai.credential().is_none() {
            self.ai.api_key = env_key.filter(|k| !k.trim().is_empty());
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache TTL must be greater than 0".to_string(),
            ));
        }

        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "AI timeout must be greater than 0".to_string(),
            ));
        }

        if self.scraper.search_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Scraper search URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub metadata_path: Option<String>,
    pub audit_log_path: Option<String>,
    pub log_level: Option<String>,
}
