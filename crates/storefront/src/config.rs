//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GLOWCART_RECORDS_URL` - Base URL of the user/order record store
//!
//! ## Optional
//! - `GLOWCART_CATALOG_URL` - Skincare product API (default: <https://skincare-api-psi.vercel.app>)
//! - `GLOWCART_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 15)
//! - `GLOWCART_CATALOG_TTL_SECS` - Product cache lifetime (default: 300)
//! - `GLOWCART_PAGE_SIZE` - Rows per dashboard page (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://skincare-api-psi.vercel.app";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "15";
const DEFAULT_CATALOG_TTL_SECS: &str = "300";
const DEFAULT_PAGE_SIZE: &str = "5";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the record store serving `/orders` and `/users`
    pub records_url: Url,
    /// Product catalog configuration
    pub catalog: CatalogConfig,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
    /// Rows per page in dashboard listings
    pub page_size: NonZeroUsize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Skincare product API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; products are served from `{base_url}/api/data`
    pub base_url: Url,
    /// How long a fetched product list stays cached
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let records_url = parse_base_url(
            "GLOWCART_RECORDS_URL",
            &get_required_env(&lookup, "GLOWCART_RECORDS_URL")?,
        )?;
        let catalog = CatalogConfig {
            base_url: parse_base_url(
                "GLOWCART_CATALOG_URL",
                &get_env_or_default(&lookup, "GLOWCART_CATALOG_URL", DEFAULT_CATALOG_URL),
            )?,
            cache_ttl: Duration::from_secs(get_parsed_env(
                &lookup,
                "GLOWCART_CATALOG_TTL_SECS",
                DEFAULT_CATALOG_TTL_SECS,
            )?),
        };
        let http_timeout = Duration::from_secs(get_parsed_env(
            &lookup,
            "GLOWCART_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let page_size = get_parsed_env(&lookup, "GLOWCART_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

        Ok(Self {
            records_url,
            catalog,
            http_timeout,
            page_size,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed into `T`, falling back to `default`.
fn get_parsed_env<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(lookup, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an HTTP(S) base URL that paths can be appended to.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be a base URL".to_string(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "GLOWCART_RECORDS_URL",
            "https://records.example.com/api/v1",
        )]))
        .unwrap();

        assert_eq!(config.records_url.as_str(), "https://records.example.com/api/v1");
        assert_eq!(config.catalog.base_url.as_str(), "https://skincare-api-psi.vercel.app/");
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.page_size.get(), 5);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_records_url() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "GLOWCART_RECORDS_URL"));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[
            ("GLOWCART_RECORDS_URL", "http://localhost:4000"),
            ("GLOWCART_PAGE_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "GLOWCART_PAGE_SIZE"));
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[
            ("GLOWCART_RECORDS_URL", "http://localhost:4000"),
            ("GLOWCART_HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_base_url_rejects_non_http() {
        assert!(parse_base_url("TEST", "ftp://example.com").is_err());
        assert!(parse_base_url("TEST", "mailto:someone@example.com").is_err());
        assert!(parse_base_url("TEST", "not a url").is_err());
        assert!(parse_base_url("TEST", " https://example.com/api ").is_ok());
    }
}
