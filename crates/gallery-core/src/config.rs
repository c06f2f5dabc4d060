//! Configuration module
//!
//! Runtime configuration is read once from the environment (optionally seeded by a
//! `.env` file), validated, and then handed to each component at construction time.
//! Nothing in the gallery reads configuration from a global.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_MIN_DIMENSION, DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH,
};

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const STORE_OPERATION_TIMEOUT_MS: u64 = 5_000;
const MAX_FILE_SIZE_MB: usize = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Where image records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataBackend {
    /// PostgreSQL through a pooled connection (`DATABASE_URL`).
    Postgres,
    /// Process-local map; records are lost on restart.
    Memory,
}

impl FromStr for MetadataBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(MetadataBackend::Postgres),
            "memory" => Ok(MetadataBackend::Memory),
            other => Err(anyhow::anyhow!(
                "METADATA_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
    // Metadata store
    pub metadata_backend: MetadataBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub store_operation_timeout: Duration,
    // Artifacts
    pub image_dir: PathBuf,
    pub max_file_size_bytes: usize,
    // Ingestion policy
    pub min_width: u32,
    pub min_height: u32,
    /// `None` means unbounded.
    pub max_width: Option<u32>,
    /// `None` means unbounded.
    pub max_height: Option<u32>,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    // Publisher credentials (HTTP basic)
    pub publisher_username: String,
    pub publisher_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            metadata_backend: MetadataBackend::Memory,
            database_url: None,
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            store_operation_timeout: Duration::from_millis(STORE_OPERATION_TIMEOUT_MS),
            image_dir: PathBuf::from("images"),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            min_width: DEFAULT_MIN_DIMENSION,
            min_height: DEFAULT_MIN_DIMENSION,
            max_width: None,
            max_height: None,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            publisher_username: String::new(),
            publisher_password: String::new(),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when unset.
/// A value that is set but unparsable is a startup error.
fn parse_env<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        _ => Ok(default),
    }
}

/// `0` disables a bound.
fn optional_bound(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let metadata_backend = parse_env("METADATA_BACKEND", MetadataBackend::Postgres)?;

        let config = Config {
            server_port: parse_env("PORT", SERVER_PORT)?,
            environment,
            cors_origins,
            http_concurrency_limit: parse_env("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?
                .max(1),
            metadata_backend,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_env("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            store_operation_timeout: Duration::from_millis(parse_env(
                "STORE_OPERATION_TIMEOUT_MS",
                STORE_OPERATION_TIMEOUT_MS,
            )?),
            image_dir: PathBuf::from(
                env::var("IMAGE_DIR").unwrap_or_else(|_| "images".to_string()),
            ),
            max_file_size_bytes: parse_env("MAX_FILE_SIZE_MB", MAX_FILE_SIZE_MB)? * 1024 * 1024,
            min_width: parse_env("MIN_WIDTH", DEFAULT_MIN_DIMENSION)?,
            min_height: parse_env("MIN_HEIGHT", DEFAULT_MIN_DIMENSION)?,
            max_width: optional_bound(parse_env("MAX_WIDTH", 0)?),
            max_height: optional_bound(parse_env("MAX_HEIGHT", 0)?),
            thumbnail_width: parse_env("THUMBNAIL_WIDTH", DEFAULT_THUMBNAIL_WIDTH)?,
            thumbnail_height: parse_env("THUMBNAIL_HEIGHT", DEFAULT_THUMBNAIL_HEIGHT)?,
            publisher_username: env::var("PUBLISHER_USERNAME").unwrap_or_default(),
            publisher_password: env::var("PUBLISHER_PASSWORD").unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.metadata_backend == MetadataBackend::Postgres {
            match self.database_url.as_deref() {
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when METADATA_BACKEND=postgres"
                    ))
                }
                Some(url)
                    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") =>
                {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
                Some(_) => {}
            }
        }

        if self.min_width == 0 || self.min_height == 0 {
            return Err(anyhow::anyhow!("MIN_WIDTH and MIN_HEIGHT must be positive"));
        }

        if let Some(max) = self.max_width {
            if max < self.min_width {
                return Err(anyhow::anyhow!("MAX_WIDTH must not be below MIN_WIDTH"));
            }
        }
        if let Some(max) = self.max_height {
            if max < self.min_height {
                return Err(anyhow::anyhow!("MAX_HEIGHT must not be below MIN_HEIGHT"));
            }
        }

        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_WIDTH and THUMBNAIL_HEIGHT must be positive"
            ));
        }

        if self.store_operation_timeout.is_zero() {
            return Err(anyhow::anyhow!("STORE_OPERATION_TIMEOUT_MS must be positive"));
        }

        if self.publisher_username.is_empty() || self.publisher_password.is_empty() {
            return Err(anyhow::anyhow!(
                "PUBLISHER_USERNAME and PUBLISHER_PASSWORD must be set"
            ));
        }

        Ok(())
    }
}
