mod headers;

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use amzviral_core::{AppConfig, ProductRecord};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use reqwest::{redirect, Client};

use crate::asin::extract_asin;
use crate::error::ScraperError;
use crate::extract::{extract_product, extract_search_results};
use crate::retry::{retry_with_backoff, RetryPolicy};

use self::headers::{browser_headers, detect_block, USER_AGENTS};

/// HTTP client for Amazon India product and search pages.
///
/// Every fetch goes through [`RetryPolicy`]: a randomly chosen desktop
/// user agent per attempt, a fixed set of browser headers, and anti-bot page
/// detection on 2xx bodies. Pages are requested from `base_url`, which is
/// `https://www.amazon.in` outside of tests; canonical product links always
/// point at the real origin.
pub struct AmazonClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    rng: Mutex<StdRng>,
}

impl AmazonClient {
    /// Creates a client with the given per-attempt timeout, redirect cap and
    /// retry policy. User agents are drawn from an OS-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        max_redirects: usize,
        retry: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(redirect::Policy::limited(max_redirects))
            .default_headers(browser_headers())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            retry,
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// Builds a client from the `AMZVIRAL_SCRAPER_*` settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let retry = RetryPolicy {
            max_attempts: config.scraper_max_attempts,
            attempt_delay: Duration::from_millis(config.scraper_attempt_delay_ms),
            backoff_delay: Duration::from_millis(config.scraper_backoff_delay_ms),
        };
        Self::new(
            &config.amazon_base_url,
            config.scraper_timeout_secs,
            config.scraper_max_redirects,
            retry,
        )
    }

    /// Replaces the user-agent generator with a seeded one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns the last error observed once all attempts fail:
    /// [`ScraperError::Network`] for transport failures and timeouts,
    /// [`ScraperError::UnexpectedStatus`] for non-2xx responses, or
    /// [`ScraperError::Blocked`] when the body is an anti-bot page.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.retry, move |attempt| async move {
            let user_agent = self.pick_user_agent();
            tracing::debug!(attempt, url, user_agent, "fetching page");

            let response = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, user_agent)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            if let Some(indicator) = detect_block(&body) {
                return Err(ScraperError::Blocked {
                    url: url.to_owned(),
                    indicator,
                });
            }

            Ok(body)
        })
        .await
    }

    /// Runs a search and returns up to `limit` listings from the first
    /// results page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Validation`] for an empty query or a zero
    /// limit, otherwise any error from [`AmazonClient::fetch_page`].
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ScraperError::Validation(
                "search query must not be empty".to_owned(),
            ));
        }
        if limit == 0 {
            return Err(ScraperError::Validation(
                "search limit must be positive".to_owned(),
            ));
        }

        let url = self.search_url(query);
        let html = self.fetch_page(&url).await?;
        let products = extract_search_results(&html, limit);
        tracing::info!(query, found = products.len(), "search results extracted");
        Ok(products)
    }

    /// Scrapes a single product page identified by any Amazon product URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidProductUrl`] when no ASIN can be found
    /// in `url`, [`ScraperError::Parse`] when the page has no title, or any
    /// error from [`AmazonClient::fetch_page`].
    pub async fn scrape_product(&self, url: &str) -> Result<ProductRecord, ScraperError> {
        let asin = extract_asin(url).ok_or_else(|| ScraperError::InvalidProductUrl {
            url: url.to_owned(),
        })?;

        let page_url = format!("{}/dp/{asin}", self.base_url);
        let html = self.fetch_page(&page_url).await?;
        let product = extract_product(&html, &asin)?;
        tracing::info!(asin, title = %product.title, "product scraped");
        Ok(product)
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/s?k={}",
            self.base_url,
            utf8_percent_encode(query, NON_ALPHANUMERIC)
        )
    }

    fn pick_user_agent(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        USER_AGENTS
            .choose(&mut *rng)
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }
}
