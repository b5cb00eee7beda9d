//! API configuration
//!
//! Settings come from `API_*` environment variables (after `.env` is
//! loaded by the binary). Every key has a default, so an empty environment
//! yields a working local setup.

use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/policies";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL (`API_DATABASE_URL`, else `DATABASE_URL`)
    pub database_url: String,
    /// Maximum connections in the database pool
    pub db_max_connections: u32,
    /// Log level, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Comma separated list of allowed CORS origins, `*` for any
    pub cors_allowed_origins: String,
    /// Apply pending schema migrations at startup
    pub run_migrations: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_allowed_origins: "http://localhost:4200".to_string(),
            run_migrations: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(
            config::Environment::with_prefix("API"),
            std::env::var("DATABASE_URL").ok(),
        )
    }

    /// Loads configuration from an environment source, falling back to
    /// `database_url` and then the built-in defaults
    pub fn load(
        environment: config::Environment,
        database_url: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", database_url.unwrap_or(defaults.database_url))?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("cors_allowed_origins", defaults.cors_allowed_origins)?
            .set_default("run_migrations", defaults.run_migrations)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins().iter().any(|origin| origin == "*")
    }

    /// Returns the configured CORS origins, trimmed and without empties
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}
