//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MINICART_HOST` - Bind address (default: 127.0.0.1)
//! - `MINICART_PORT` - Listen port (default: 3000)
//! - `MINICART_CATALOG_URL` - Product catalog endpoint
//!   (default: <https://dummyjson.com/products>)
//! - `MINICART_DATA_DIR` - Directory holding `storage.json` (default: .minicart)
//! - `MINICART_STORAGE_QUOTA_BYTES` - Size limit for the storage file
//!   (default: 5242880, the usual browser local storage limit)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";

/// Default storage size limit in bytes.
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

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
    /// Remote product catalog endpoint
    pub catalog_url: Url,
    /// Storage adapter configuration
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "development")
    pub sentry_environment: Option<String>,
}

/// File storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the storage file
    pub data_dir: PathBuf,
    /// Maximum size of the storage file in bytes
    pub quota_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".minicart"),
            quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
        }
    }
}

impl StorageConfig {
    /// Load storage settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the quota is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default("MINICART_DATA_DIR", ".minicart"));
        let quota_bytes = get_optional_env("MINICART_STORAGE_QUOTA_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "MINICART_STORAGE_QUOTA_BYTES".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_STORAGE_QUOTA_BYTES);

        Ok(Self {
            data_dir,
            quota_bytes,
        })
    }

    /// Path of the storage file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MINICART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MINICART_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MINICART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MINICART_PORT".to_string(), e.to_string()))?;
        let catalog_url = catalog_url_from_env()?;
        let storage = StorageConfig::from_env()?;

        Ok(Self {
            host,
            port,
            catalog_url,
            storage,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Read and validate `MINICART_CATALOG_URL`.
///
/// # Errors
///
/// Returns `ConfigError` if the value is not an absolute http(s) URL.
pub fn catalog_url_from_env() -> Result<Url, ConfigError> {
    parse_catalog_url(&get_env_or_default(
        "MINICART_CATALOG_URL",
        DEFAULT_CATALOG_URL,
    ))
}

fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("MINICART_CATALOG_URL".to_string(), reason);

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
