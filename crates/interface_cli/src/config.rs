//! Loader configuration

use serde::Deserialize;

use infra_db::DatabaseConfig;

/// Loader configuration, read from `LOADER_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/relocation".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            max_connections: 5,
        }
    }
}

impl LoaderConfig {
    /// Loads configuration from the environment, filling gaps with defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("max_connections", defaults.max_connections)?
            .add_source(config::Environment::with_prefix("LOADER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Pool settings for this configuration
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.max_connections)
            .min_connections(1)
    }
}
