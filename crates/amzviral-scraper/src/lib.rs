//! Amazon India listing scraper: page fetching with retry and block
//! detection, selector-based extraction, static fallback data, and the
//! discovery orchestrator that ties them together.

pub mod asin;
pub mod client;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod retry;

pub use asin::{canonical_url, extract_asin, CANONICAL_ORIGIN};
pub use client::AmazonClient;
pub use discovery::{Discovery, DiscoveryTarget, ProductSource, SearchSource};
pub use error::ScraperError;
pub use extract::{extract_product, extract_search_results};
pub use fallback::fallback_products;
pub use retry::RetryPolicy;
