//! # API Configuration Module
//!
//! Loads the server and shop configuration from environment variables.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `STORE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `OPENING_HOUR` / `CLOSING_HOUR`: Business hours (default: 9 / 22)
//! - `SLOT_DURATION_MINUTES`: Length of a bookable slot (default: 35)
//! - `BUSINESS_TIMEZONE`: IANA zone the shop operates in (default: "America/Bogota")
//! - `SLOT_REFRESH_SECONDS`: Poll interval advertised to clients (default: 30)
//! - `NOTIFY_WEBHOOK_URL`: Where booking notifications are POSTed (optional)

use std::{env, str::FromStr};

use barberbook_core::models::business_hours::{
    BusinessHours, DEFAULT_CLOSING_HOUR, DEFAULT_OPENING_HOUR, DEFAULT_SLOT_DURATION_MINUTES,
};
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

pub const DEFAULT_TIMEZONE: &str = "America/Bogota";
pub const DEFAULT_SLOT_REFRESH_SECONDS: u64 = 30;

/// Which reservation store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(eyre!("Unknown STORE_BACKEND: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    pub port: u16,

    pub store_backend: StoreBackend,

    /// PostgreSQL connection string; always present for the postgres backend
    pub database_url: Option<String>,

    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub business_hours: BusinessHours,

    pub timezone: Tz,

    pub slot_refresh_seconds: u64,

    pub notify_webhook_url: Option<String>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` is not set while the postgres backend is selected
    /// - a numeric setting cannot be parsed
    /// - the business hours are invalid (hour past 24, zero-length slots)
    /// - `BUSINESS_TIMEZONE` is not a known IANA zone
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `from_env` passes the
    /// process environment.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("API_PORT", var("API_PORT"), 3000)?;

        // Storage settings
        let store_backend = match var("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::Postgres,
        };
        let database_url = var("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(eyre!("DATABASE_URL environment variable must be set"));
        }

        // Logging settings
        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let cors_origins = var("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // Shop settings
        let business_hours = BusinessHours::new(
            parse_or("OPENING_HOUR", var("OPENING_HOUR"), DEFAULT_OPENING_HOUR)?,
            parse_or("CLOSING_HOUR", var("CLOSING_HOUR"), DEFAULT_CLOSING_HOUR)?,
            parse_or(
                "SLOT_DURATION_MINUTES",
                var("SLOT_DURATION_MINUTES"),
                DEFAULT_SLOT_DURATION_MINUTES,
            )?,
        )
        .map_err(|e| eyre!("Invalid business hours: {}", e))?;

        let timezone_name = var("BUSINESS_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|e| eyre!("Invalid BUSINESS_TIMEZONE {}: {}", timezone_name, e))?;

        let slot_refresh_seconds = parse_or(
            "SLOT_REFRESH_SECONDS",
            var("SLOT_REFRESH_SECONDS"),
            DEFAULT_SLOT_REFRESH_SECONDS,
        )?;

        let notify_webhook_url = var("NOTIFY_WEBHOOK_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            host,
            port,
            store_backend,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            business_hours,
            timezone,
            slot_refresh_seconds,
            notify_webhook_url,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", key)),
        None => Ok(default),
    }
}
