//! Application Configuration
//!
//! Settings baked into the wasm bundle at build time:
//! `VENUE_API_URL` (REST base URL) and `VENUE_PAYMENT_KEY` (payment
//! provider public key).

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const APP_NAME: &str = "VenueHub";
pub const LOG_CAPACITY: usize = rolling_logger::DEFAULT_CAPACITY;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("API base URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL without trailing slash
    pub api_base_url: String,
    /// Public key handed to the payment provider checkout
    pub payment_key: Option<String>,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            payment_key: None,
            page_size: leptos_listing::DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Read the build-time environment, falling back to defaults on bad input
    pub fn from_env() -> Self {
        Self::build(option_env!("VENUE_API_URL"), option_env!("VENUE_PAYMENT_KEY")).unwrap_or_else(|e| {
            log::error!("[config] {}; using {}", e, DEFAULT_API_URL);
            Self::default()
        })
    }

    pub fn build(api_url: Option<&str>, payment_key: Option<&str>) -> Result<Self, ConfigError> {
        let api_base_url = match api_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => normalize_base_url(url)?,
            None => DEFAULT_API_URL.to_string(),
        };
        let payment_key = payment_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self {
            api_base_url,
            payment_key,
            ..Default::default()
        })
    }
}

/// Require an http(s) scheme and strip trailing slashes
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(url.to_string()));
    }
    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::build(None, None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.payment_key, None);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let config = AppConfig::build(Some("https://api.example.com/v1//"), Some(" pk_live ")).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.payment_key.as_deref(), Some("pk_live"));
    }

    #[test]
    fn test_scheme_is_required() {
        assert_eq!(
            AppConfig::build(Some("api.example.com"), None),
            Err(ConfigError::InvalidApiUrl("api.example.com".to_string()))
        );
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::build(Some("   "), Some("")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(config.payment_key.is_none());
    }
}
