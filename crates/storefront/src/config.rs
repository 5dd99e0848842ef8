//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog (default: built-in catalog)
//! - `STOREFRONT_CHECKOUT_PROCESSING_MS` - Simulated payment delay (default: 900)
//! - `STOREFRONT_CHECKOUT_REDIRECT_MS` - Delay before leaving checkout (default: 1400)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Optional JSON file replacing the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Mock checkout timings
    pub checkout: CheckoutTimings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Delays of the simulated payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTimings {
    /// Time between "processing" and "order placed"
    pub processing_delay: Duration,
    /// Time between "order placed" and the redirect home
    pub redirect_delay: Duration,
}

impl Default for CheckoutTimings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(900),
            redirect_delay: Duration::from_millis(1400),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/storefront/static"),
            catalog_path: None,
            checkout: CheckoutTimings::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env("STOREFRONT_HOST", defaults.host)?;
        let port = parse_env("STOREFRONT_PORT", defaults.port)?;
        let base_url = get_optional_env("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url);
        validate_base_url(&base_url)?;
        let static_dir = get_optional_env("STOREFRONT_STATIC_DIR")
            .map_or(defaults.static_dir, PathBuf::from);
        let catalog_path = get_optional_env("STOREFRONT_CATALOG_PATH").map(PathBuf::from);
        let checkout = CheckoutTimings::from_env(defaults.checkout)?;

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            catalog_path,
            checkout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CheckoutTimings {
    fn from_env(defaults: Self) -> Result<Self, ConfigError> {
        let processing_ms = parse_env(
            "STOREFRONT_CHECKOUT_PROCESSING_MS",
            millis(defaults.processing_delay),
        )?;
        let redirect_ms = parse_env(
            "STOREFRONT_CHECKOUT_REDIRECT_MS",
            millis(defaults.redirect_delay),
        )?;
        Ok(Self {
            processing_delay: Duration::from_millis(processing_ms),
            redirect_delay: Duration::from_millis(redirect_ms),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Reject base URLs that are not absolute http(s) URLs.
fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
