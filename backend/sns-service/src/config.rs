/// Configuration management for SNS Service
///
/// All settings come from environment variables, optionally seeded from a
/// `.env` file by the binary.
use db_pool::env_utils::{parse_env_or, parse_flag_or};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Log output configuration
    pub logging: LoggingConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of HTTP worker threads
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, `*` for any
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CorsConfig {
    /// Individual origins, trimmed, empty entries dropped
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("SNS_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_or("SNS_SERVICE_PORT", 8000)?,
            workers: parse_env_or("HTTP_WORKERS", 4)?,
        };

        if app.workers == 0 {
            return Err("HTTP_WORKERS must be at least 1".to_string());
        }

        let cors = {
            let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(value) => value,
                Err(_) if app.is_production() => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                Err(_) => "*".to_string(),
            };

            CorsConfig { allowed_origins }
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/sns".to_string()),
            max_connections: parse_env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_flag_or("RUN_MIGRATIONS", true)?,
        };

        let logging = LoggingConfig {
            format: parse_log_format(std::env::var("LOG_FORMAT").ok().as_deref())?,
        };

        Ok(Config {
            app,
            cors,
            database,
            logging,
        })
    }
}

fn parse_log_format(raw: Option<&str>) -> Result<LogFormat, String> {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        None => Ok(LogFormat::Text),
        Some(value) if value.is_empty() || value == "text" => Ok(LogFormat::Text),
        Some(value) if value == "json" => Ok(LogFormat::Json),
        Some(value) => Err(format!(
            "Failed to parse LOG_FORMAT='{}' (expected 'text' or 'json')",
            value
        )),
    }
}
