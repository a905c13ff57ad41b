//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CUSTOMER_SERVICE_HOST` - Bind address (default: 0.0.0.0)
//! - `CUSTOMER_SERVICE_PORT` - Listen port (default: 8000)
//! - `CUSTOMER_SERVICE_FIRST_ID` - ID assigned to the first customer (default: 1)
//! - `CUSTOMER_SERVICE_RATE_LIMIT` - Enable per-IP rate limiting on `/api` (default: true)
//! - `CUSTOMER_SERVICE_RATE_LIMIT_PER_SECOND` - Seconds to replenish one request (default: 1)
//! - `CUSTOMER_SERVICE_RATE_LIMIT_BURST` - Burst size per client (default: 50)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.1)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use customer_service_core::CustomerId;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// ID handed to the first customer created
    pub first_customer_id: CustomerId,
    /// Rate limiting for the `/api` routes
    pub rate_limit: RateLimitConfig,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Per-client rate limiting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Seconds it takes to replenish one request
    pub per_second: u64,
    /// Requests a client may make in a burst
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 1,
            burst_size: 50,
        }
    }
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone)]
pub struct SentryConfig {
    /// Sentry DSN; Sentry stays disabled when unset
    pub dsn: Option<SecretString>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.1,
        }
    }
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .field("traces_sample_rate", &self.traces_sample_rate)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            first_customer_id: CustomerId::new(1),
            rate_limit: RateLimitConfig::default(),
            json_logs: false,
            sentry: SentryConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env_or("CUSTOMER_SERVICE_HOST", defaults.host)?;
        let port = parse_env_or("CUSTOMER_SERVICE_PORT", defaults.port)?;

        let first_id: i64 = parse_env_or(
            "CUSTOMER_SERVICE_FIRST_ID",
            defaults.first_customer_id.as_i64(),
        )?;
        if first_id < 1 {
            return Err(ConfigError::InvalidEnvVar(
                "CUSTOMER_SERVICE_FIRST_ID".to_string(),
                format!("must be at least 1 (got {first_id})"),
            ));
        }

        let rate_limit = RateLimitConfig::from_env(defaults.rate_limit)?;
        let json_logs = get_optional_env("LOG_FORMAT")
            .is_some_and(|format| format.eq_ignore_ascii_case("json"));
        let sentry = SentryConfig::from_env(&defaults.sentry)?;

        Ok(Self {
            host,
            port,
            first_customer_id: CustomerId::new(first_id),
            rate_limit,
            json_logs,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl RateLimitConfig {
    fn from_env(defaults: Self) -> Result<Self, ConfigError> {
        let enabled = parse_bool_env_or("CUSTOMER_SERVICE_RATE_LIMIT", defaults.enabled)?;
        let per_second =
            parse_env_or("CUSTOMER_SERVICE_RATE_LIMIT_PER_SECOND", defaults.per_second)?;
        let burst_size = parse_env_or("CUSTOMER_SERVICE_RATE_LIMIT_BURST", defaults.burst_size)?;

        if per_second == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CUSTOMER_SERVICE_RATE_LIMIT_PER_SECOND".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if burst_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CUSTOMER_SERVICE_RATE_LIMIT_BURST".to_string(),
                "must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            enabled,
            per_second,
            burst_size,
        })
    }
}

impl SentryConfig {
    fn from_env(defaults: &Self) -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate_env_or("SENTRY_SAMPLE_RATE", defaults.sample_rate)?,
            traces_sample_rate: parse_rate_env_or(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.traces_sample_rate,
            )?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_bool_env_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| parse_bool(key, &raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Parse a sample rate in the range 0.0-1.0.
fn parse_rate_env_or(key: &str, default: f32) -> Result<f32, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| parse_rate(key, &raw))
}

fn parse_rate(key: &str, raw: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_value(key, raw)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}
