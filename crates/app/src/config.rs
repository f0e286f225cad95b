//! Feature configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `SHOPIFY_APP_URL` - Public origin scan-landing URLs are built on
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2026-01)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "2026-01";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// QR code feature configuration.
///
/// The per-tenant shop domain and Admin API access token are NOT part of
/// this: the host platform hands those over with each authenticated
/// session, and they travel as explicit values (see
/// [`crate::shopify::AdminApiClient::new`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Public application origin; scan-landing URLs are built on it
    pub app_url: Url,
    /// Shopify Admin API version (e.g., 2026-01)
    pub shopify_api_version: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_required_env("DATABASE_URL")?);

        let app_url = get_required_env("SHOPIFY_APP_URL")?;
        let app_url = Url::parse(&app_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPIFY_APP_URL".to_string(), e.to_string())
        })?;

        let shopify_api_version = get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);

        Ok(Self {
            database_url,
            app_url,
            shopify_api_version,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
