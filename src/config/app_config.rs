use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection as read from configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let pg = PostgresConfig::default();

        Self {
            backend: "memory".to_string(),
            url: None,
            max_connections: pg.max_connections,
            min_connections: pg.min_connections,
            connect_timeout_secs: pg.connect_timeout_secs,
            idle_timeout_secs: pg.idle_timeout_secs,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the storage settings into a backend configuration
    pub fn storage_config(&self) -> Result<StorageConfig, DomainError> {
        let settings = &self.storage;

        match settings.backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = settings.url.clone().ok_or_else(|| {
                    DomainError::configuration("storage.url is required for the postgres backend")
                })?;

                Ok(StorageConfig::Postgres(PostgresConfig {
                    url,
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                    connect_timeout_secs: settings.connect_timeout_secs,
                    idle_timeout_secs: settings.idle_timeout_secs,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_memory_storage() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(
            config.storage_config().unwrap().storage_type(),
            StorageType::InMemory
        );
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = AppConfig::default();
        config.storage.backend = "postgres".to_string();

        let err = config.storage_config().unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));

        config.storage.url = Some("postgres://db/roster".to_string());
        config.storage.max_connections = 4;
        match config.storage_config().unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://db/roster");
                assert_eq!(pg.max_connections, 4);
            }
            other => panic!("unexpected backend {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend() {
        let mut config = AppConfig::default();
        config.storage.backend = "redis".to_string();

        assert!(config.storage_config().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = serde_json::json!({ "logging": { "level": "debug", "format": "json" } });
        let config: AppConfig = serde_json::from_value(json).unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.backend, "memory");
    }
}
