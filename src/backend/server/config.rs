/**
 * Server Configuration
 *
 * Configuration comes from `config.toml`, one table per environment:
 *
 * ```toml
 * [environments.local]
 * port = 3000
 * collection = "users"
 *
 * [environments.production]
 * port = 8080
 * database_url = "postgres://petalpix@db/petalpix"
 * clamp_counts = true
 * ```
 *
 * # Configuration Sources
 *
 * 1. `APP_ENV` selects the environment table (default `local`)
 * 2. `PETALPIX_CONFIG` points at the file (default `config.toml`); a missing
 *    default file means built-in defaults
 * 3. `DATABASE_URL` and `SERVER_PORT` override the file
 *
 * # Database
 *
 * Without a `database_url` the server runs on the in-memory collection and
 * logs a warning. With one, failing to connect is fatal; failing to run
 * migrations is logged and startup continues.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::backend::graph::GraphPolicy;
use crate::backend::store::{MemoryUserCollection, PgUserCollection, UserCollection};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_ENVIRONMENT: &str = "local";

/// Errors raised while loading configuration or opening the store
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No [environments.{name}] table in config file")]
    UnknownEnvironment { name: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    environments: HashMap<String, ServerConfig>,
}

/// Settings for one environment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Name of the selected environment table
    #[serde(skip)]
    pub environment: String,
    pub port: u16,
    /// PostgreSQL URL; `None` runs on the in-memory collection
    pub database_url: Option<String>,
    /// Table holding the user documents
    pub collection: String,
    pub max_connections: u32,
    pub store_timeout_ms: u64,
    pub phase2_retries: usize,
    pub phase2_backoff_ms: u64,
    pub dedup_targets: bool,
    pub clamp_counts: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            port: 3000,
            database_url: None,
            collection: "users".to_string(),
            max_connections: 5,
            store_timeout_ms: 5000,
            phase2_retries: 3,
            phase2_backoff_ms: 10,
            dedup_targets: false,
            clamp_counts: false,
        }
    }
}

impl ServerConfig {
    /// Load the environment named by `APP_ENV` and apply env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        let mut config = match std::env::var("PETALPIX_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path), &environment)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH), &environment)?
            }
            Err(_) => {
                tracing::warn!("{} not found, using built-in defaults", DEFAULT_CONFIG_PATH);
                Self {
                    environment,
                    ..Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::info!(
            environment = %config.environment,
            port = config.port,
            database = config.database_url.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_file(path: &Path, environment: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, environment)
    }

    /// Parse a config file and pick one environment table
    pub fn from_toml_str(contents: &str, environment: &str) -> Result<Self, ConfigError> {
        let mut file: ConfigFile = toml::from_str(contents)?;
        let mut config = file.environments.remove(environment).ok_or_else(|| {
            ConfigError::UnknownEnvironment {
                name: environment.to_string(),
            }
        })?;
        config.environment = environment.to_string();
        Ok(config)
    }

    /// Apply `DATABASE_URL` and `SERVER_PORT` as returned by `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("SERVER_PORT", format!("'{}' is not a port", port)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "must not be 0"));
        }
        if !is_plain_identifier(&self.collection) {
            return Err(ConfigError::invalid(
                "collection",
                format!("'{}' is not a plain table name", self.collection),
            ));
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::invalid("store_timeout_ms", "must be positive"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::invalid("max_connections", "must be positive"));
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn graph_policy(&self) -> GraphPolicy {
        GraphPolicy {
            dedup_targets: self.dedup_targets,
            clamp_counts: self.clamp_counts,
            store_timeout: self.store_timeout(),
            phase2_retries: self.phase2_retries,
            phase2_backoff: Duration::from_millis(self.phase2_backoff_ms),
        }
    }
}

/// ASCII letter or underscore, then letters, digits or underscores
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Open the user collection
///
/// Connects to PostgreSQL and runs migrations when a database URL is
/// configured; otherwise returns an empty in-memory collection.
pub async fn load_store(config: &ServerConfig) -> Result<Arc<dyn UserCollection>, ConfigError> {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("No database_url configured. Users are kept in memory only.");
            return Ok(Arc::new(MemoryUserCollection::new()));
        }
    };

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.store_timeout())
        .connect(database_url)
        .await?;
    tracing::info!("Database connection pool created");

    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - schema might not be up to date");
        }
    }

    Ok(Arc::new(PgUserCollection::new(pool, config.collection.clone())))
}
