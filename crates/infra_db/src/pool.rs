//! PostgreSQL connection pool
//!
//! Configuration comes either from the [`DatabaseConfig`] builder or from
//! `DATABASE_*` environment variables via [`DatabaseConfig::from_env`].

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

pub type DatabasePool = PgPool;

/// Pool settings
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("postgres://localhost/relocation")
///     .max_connections(20)
///     .connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.max_connections, 20);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Also bounds how long a query waits for a free connection
    pub connect_timeout: Duration,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Loads the configuration from `DATABASE_*` environment variables
    ///
    /// `DATABASE_URL` is required. `DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_MIN_CONNECTIONS` and `DATABASE_CONNECT_TIMEOUT_SECS`
    /// override the defaults when set.
    pub fn from_env() -> Result<Self, DatabaseError> {
        let settings: DatabaseSettings = config::Config::builder()
            .add_source(config::Environment::with_prefix("DATABASE").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DatabaseError::Configuration(e.to_string()))?;

        Ok(settings.into_config())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/relocation")
    }
}

#[derive(Debug, Deserialize)]
struct DatabaseSettings {
    url: String,
    max_connections: Option<u32>,
    min_connections: Option<u32>,
    connect_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    fn into_config(self) -> DatabaseConfig {
        let mut config = DatabaseConfig::new(self.url);
        if let Some(max) = self.max_connections {
            config = config.max_connections(max);
        }
        if let Some(min) = self.min_connections {
            config = config.min_connections(min);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config = config.connect_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Opens a pool with the given settings
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Creating database pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created");
    Ok(pool)
}

pub async fn create_pool_from_url(url: &str) -> Result<DatabasePool, DatabaseError> {
    create_pool(DatabaseConfig::new(url)).await
}
