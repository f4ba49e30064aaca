//! Configuration for the metadata resolver.

use std::env;
use std::time::Duration;

/// Default scraping API base URL.
pub const DEFAULT_API_URL: &str = "https://scraping.soax.com";

/// Header carrying the scraping API secret.
pub const SECRET_HEADER: &str = "X-SOAX-API-Secret";

/// Default timeout for scraping calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for [`MetadataResolver`](crate::MetadataResolver).
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Scraping API base URL.
    pub api_url: String,

    /// API secret sent in the [`SECRET_HEADER`] header.
    pub api_secret: String,

    /// Request timeout for both strategies.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_secret: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SCRAPER_API_SECRET` | API secret | (required) |
    /// | `SCRAPER_API_URL` | API base URL | `https://scraping.soax.com` |
    /// | `SCRAPER_TIMEOUT_SECS` | Request timeout in seconds | `60` |
    pub fn from_env() -> Result<Self, crate::ResolverError> {
        let api_secret = env::var("SCRAPER_API_SECRET").map_err(|_| {
            crate::ResolverError::Configuration("SCRAPER_API_SECRET not set".to_string())
        })?;

        let api_url =
            env::var("SCRAPER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout = env::var("SCRAPER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_url,
            api_secret,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }
}

/// Builder for [`ResolverConfig`].
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the API secret.
    pub fn api_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.api_secret = secret.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
