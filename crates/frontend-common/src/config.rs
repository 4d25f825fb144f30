//! Frontend configuration

use medadmin_core::PublicPaths;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend URL {url}: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every API path is appended to
    pub backend_url: String,
    pub request_timeout: Duration,
    /// Paths rendered without an auth check
    pub public_paths: PublicPaths,
    /// `tracing` filter directive
    pub log_level: String,
}

impl AppConfig {
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:5000/api";

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Configuration baked in at build time through `MEDADMIN_BACKEND_URL`
    /// and `MEDADMIN_LOG`
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("MEDADMIN_BACKEND_URL") {
            config.backend_url = url.to_string();
        }
        if let Some(level) = option_env!("MEDADMIN_LOG") {
            config.log_level = level.to_string();
        }
        config
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_public_paths(mut self, paths: PublicPaths) -> Self {
        self.public_paths = paths;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed =
            Url::parse(&self.backend_url).map_err(|e| ConfigError::InvalidBackendUrl {
                url: self.backend_url.clone(),
                reason: e.to_string(),
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBackendUrl {
                url: self.backend_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Self::DEFAULT_TIMEOUT,
            public_paths: PublicPaths::default(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.public_paths.contains("/login"));
    }

    #[test]
    fn rejects_bad_backend_url() {
        let config = AppConfig::default().with_backend_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBackendUrl { .. })
        ));

        let config = AppConfig::default().with_backend_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = AppConfig::default().with_request_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }
}
