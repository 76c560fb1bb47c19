//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Optional env file read before the process environment
pub const CONFIG_ENV_FILE: &str = "config.env";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection options, from `DATABASE_URL` or the `DB_*` parts
    pub database: PgConnectOptions,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Upper bound on a single balance store call
    pub store_timeout: Duration,

    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout: Duration,

    /// Apply the embedded schema migration at startup
    pub run_migrations: bool,

    pub log_format: LogFormat,
}

impl Config {
    /// Load `config.env` and `.env` if present, then read the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::from_filename(CONFIG_ENV_FILE).ok();
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url)
                .map_err(|_| ConfigError::InvalidValue("DATABASE_URL"))?,
            None => {
                let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let port: u16 = parse_or(&lookup, "DB_PORT", 5432)?;
                let user = lookup("DB_USER").ok_or(ConfigError::MissingEnv("DB_USER"))?;
                let password =
                    lookup("DB_PASSWORD").ok_or(ConfigError::MissingEnv("DB_PASSWORD"))?;
                let name = lookup("DB_NAME").ok_or(ConfigError::MissingEnv("DB_NAME"))?;
                // Set field by field so credentials are never parsed as URL syntax
                PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .password(&password)
                    .database(&name)
                    .ssl_mode(PgSslMode::Disable)
            }
        };

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(_) => parse_or(&lookup, "PORT", 8080)?,
            None => parse_or(&lookup, "SERVER_PORT", 8080)?,
        };

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let store_timeout = Duration::from_millis(parse_or(&lookup, "STORE_TIMEOUT_MS", 5000)?);
        if store_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("STORE_TIMEOUT_MS"));
        }

        let shutdown_timeout =
            Duration::from_secs(parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 10)?);

        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", true)?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        Ok(Self {
            database,
            database_max_connections,
            host,
            port,
            environment,
            store_timeout,
            shutdown_timeout,
            run_migrations,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
