//! The resolver: strategy dispatch and HTTP fetching.

use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::{ResolverConfig, SECRET_HEADER};
use crate::marketplace::{self, ScrapeResponse};
use crate::metadata::Metadata;
use crate::opengraph;
use crate::strategy::Strategy;
use crate::ResolverError;

/// Resolves submitted URLs into normalized [`Metadata`].
///
/// Strategy selection is by URL classification; both strategies go through
/// the same third-party scraping service with a bounded timeout. Every
/// failure path degrades to a placeholder record, so resolution never
/// blocks link capture.
pub struct MetadataResolver {
    client: Client,
    config: ResolverConfig,
}

impl MetadataResolver {
    /// Create a new resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self, ResolverError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ResolverError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Create a resolver from environment variables.
    ///
    /// See [`ResolverConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, ResolverError> {
        Self::new(ResolverConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a URL into metadata. Never fails: scraping errors degrade to
    /// a placeholder record for the selected strategy.
    pub async fn resolve(&self, url: &str) -> Metadata {
        let started = Instant::now();
        let strategy = Strategy::classify(url);

        let metadata = match strategy {
            Strategy::Marketplace => match self.fetch_marketplace(url).await {
                Ok(response) => marketplace::process_response(response, url),
                Err(e) => {
                    warn!("Marketplace scrape failed for {}: {}", url, e);
                    Metadata::untitled_product(url)
                }
            },
            Strategy::OpenGraph => match self.fetch_page_html(url).await {
                Ok(html) => opengraph::extract_opengraph(&html, url),
                Err(e) => {
                    warn!("Open-Graph fetch failed for {}: {}", url, e);
                    Metadata::unresolved_page(url)
                }
            },
        };

        info!(
            "Resolved {} via {:?} in {:.2?}",
            url,
            strategy,
            started.elapsed()
        );
        metadata
    }

    /// Call the product scraping endpoint for a marketplace link.
    async fn fetch_marketplace(&self, url: &str) -> Result<ScrapeResponse, reqwest::Error> {
        let endpoint = format!("{}/v1/request", self.config.api_url);
        debug!("Scraping product data for {}", url);

        self.client
            .get(&endpoint)
            .query(&[("param", url), ("function", "getProduct"), ("sync", "true")])
            .header(SECRET_HEADER, &self.config.api_secret)
            .send()
            .await?
            .error_for_status()?
            .json::<ScrapeResponse>()
            .await
    }

    /// Fetch page HTML through the unblocking proxy.
    async fn fetch_page_html(&self, url: &str) -> Result<String, reqwest::Error> {
        let endpoint = format!("{}/v1/unblocker/html", self.config.api_url);
        debug!("Fetching page HTML for {}", url);

        self.client
            .get(&endpoint)
            .query(&[("xhr", "false"), ("url", url)])
            .header(SECRET_HEADER, &self.config.api_secret)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{NO_TITLE, UNTITLED};
    use std::time::Duration;

    fn unreachable_resolver() -> MetadataResolver {
        // Point at a closed local port so transport fails fast.
        let config = ResolverConfig::builder()
            .api_url("http://127.0.0.1:9")
            .api_secret("test-secret")
            .timeout(Duration::from_millis(250))
            .build();
        MetadataResolver::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_marketplace_transport_failure_degrades() {
        let resolver = unreachable_resolver();
        let meta = resolver.resolve("https://amazon.example/item/123").await;

        assert_eq!(meta.title, UNTITLED);
        assert_eq!(meta.url, "https://amazon.example/item/123");
        assert!(meta.images.is_empty());
    }

    #[tokio::test]
    async fn test_generic_transport_failure_degrades() {
        let resolver = unreachable_resolver();
        let meta = resolver.resolve("https://example.com/article").await;

        assert_eq!(meta.title, NO_TITLE);
        assert_eq!(meta.url, "https://example.com/article");
        assert!(meta.images.is_empty());
    }
}
