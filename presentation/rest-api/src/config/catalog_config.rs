use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use url::Url;

use business::domain::product_image::aggregator::{FetchStrategy, ImageAggregator};

/// Configuration for the upstream product-image catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub fetch_timeout: Duration,
    pub max_in_flight: usize,
}

impl CatalogConfig {
    /// Load catalog configuration from environment variables
    ///
    /// Environment variables:
    /// - CATALOG_BASE_URL: Base URL of the product-image API (required)
    /// - CATALOG_REQUEST_TIMEOUT_SECS: HTTP client timeout (default: 30)
    /// - CATALOG_FETCH_TIMEOUT_MS: Timeout of a single detail fetch during aggregation (default: 10000)
    /// - CATALOG_MAX_IN_FLIGHT: Concurrent detail fetches; 1 means sequential (default: 1)
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("CATALOG_BASE_URL").context("CATALOG_BASE_URL must be set")?;

        Self::from_parts(
            &base_url,
            env::var("CATALOG_REQUEST_TIMEOUT_SECS").ok(),
            env::var("CATALOG_FETCH_TIMEOUT_MS").ok(),
            env::var("CATALOG_MAX_IN_FLIGHT").ok(),
        )
    }

    fn from_parts(
        base_url: &str,
        request_timeout_secs: Option<String>,
        fetch_timeout_ms: Option<String>,
        max_in_flight: Option<String>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("CATALOG_BASE_URL is not a valid URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("CATALOG_BASE_URL cannot be used as a base URL: {}", base_url);
        }

        let request_timeout_secs: u64 =
            parse_or("CATALOG_REQUEST_TIMEOUT_SECS", request_timeout_secs, 30)?;
        let fetch_timeout_ms: u64 = parse_or("CATALOG_FETCH_TIMEOUT_MS", fetch_timeout_ms, 10_000)?;
        let max_in_flight: usize = parse_or("CATALOG_MAX_IN_FLIGHT", max_in_flight, 1)?;

        if request_timeout_secs == 0 {
            bail!("CATALOG_REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        if fetch_timeout_ms == 0 {
            bail!("CATALOG_FETCH_TIMEOUT_MS must be greater than zero");
        }

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            max_in_flight,
        })
    }

    /// Builds the aggregator described by this configuration.
    pub fn aggregator(&self) -> ImageAggregator {
        ImageAggregator::new()
            .with_strategy(FetchStrategy::with_max_in_flight(self.max_in_flight))
            .with_fetch_timeout(self.fetch_timeout)
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
        None => Ok(default),
    }
}
