//! Discovery orchestrator: search-phrase selection, live search, and
//! fallback substitution.
//!
//! Discovery never fails. A search error or an empty result set is logged
//! and replaced with the static fallback listings for the category.

use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use amzviral_core::{
    Category, DiscoveredProduct, ProductRecord, DEALS_CATEGORY, DEAL_SEARCH_TERMS,
};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::client::AmazonClient;
use crate::error::ScraperError;
use crate::fallback::fallback_products;

/// Categories the hot-deals fallback draws from, two listings each.
const DEALS_FALLBACK_CATEGORIES: usize = 3;
const DEALS_FALLBACK_PER_CATEGORY: usize = 2;

/// A search backend returning listings for a free-text query.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ProductRecord>, ScraperError>;
}

#[async_trait]
impl SearchSource for AmazonClient {
    async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        self.search(query, limit).await
    }
}

/// Resolves a single product page into a listing.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn scrape_product(&self, url: &str) -> Result<ProductRecord, ScraperError>;
}

#[async_trait]
impl ProductSource for AmazonClient {
    async fn scrape_product(&self, url: &str) -> Result<ProductRecord, ScraperError> {
        AmazonClient::scrape_product(self, url).await
    }
}

/// What a discovery request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryTarget {
    Category(Category),
    /// Every known category, `limit` spread evenly across them.
    AllCategories,
    HotDeals,
}

impl FromStr for DiscoveryTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::AllCategories),
            "hot" | "deals" => Ok(Self::HotDeals),
            other => other.parse::<Category>().map(Self::Category),
        }
    }
}

impl std::fmt::Display for DiscoveryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(c) => write!(f, "{c}"),
            Self::AllCategories => f.write_str("all"),
            Self::HotDeals => f.write_str("hot"),
        }
    }
}

pub struct Discovery {
    source: Arc<dyn SearchSource>,
    rng: Mutex<StdRng>,
    category_pause: Duration,
}

impl Discovery {
    #[must_use]
    pub fn new(source: Arc<dyn SearchSource>, category_pause: Duration) -> Self {
        Self {
            source,
            rng: Mutex::new(StdRng::from_os_rng()),
            category_pause,
        }
    }

    /// Replaces the phrase-selection generator with a seeded one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Dispatches to the matching discovery variant.
    pub async fn run(&self, target: DiscoveryTarget, limit: usize) -> Vec<DiscoveredProduct> {
        match target {
            DiscoveryTarget::Category(category) => self.discover(category, limit).await,
            DiscoveryTarget::AllCategories => self.discover_all(limit).await,
            DiscoveryTarget::HotDeals => self.discover_hot_deals(limit).await,
        }
    }

    /// Up to `limit` listings for one category, each tagged with it.
    pub async fn discover(&self, category: Category, limit: usize) -> Vec<DiscoveredProduct> {
        if limit == 0 {
            return Vec::new();
        }

        let query = self.pick(category.search_terms());
        tracing::info!(%category, query, limit, "discovering products");

        let products = match self.source.search_products(query, limit).await {
            Ok(products) if !products.is_empty() => products,
            Ok(_) => {
                tracing::warn!(%category, query, "search returned no listings; using fallback");
                fallback_products(category)
            }
            Err(e) => {
                tracing::warn!(%category, query, error = %e, "search failed; using fallback");
                fallback_products(category)
            }
        };

        products
            .into_iter()
            .take(limit)
            .map(|p| p.into_discovered(category.as_str()))
            .collect()
    }

    /// Walks every category in catalog order, asking each for
    /// `max(1, ceil(limit / 7))` listings and pausing between categories,
    /// until `limit` listings are collected.
    pub async fn discover_all(&self, limit: usize) -> Vec<DiscoveredProduct> {
        if limit == 0 {
            return Vec::new();
        }

        let per_category = limit.div_ceil(Category::ALL.len()).max(1);
        let mut collected = Vec::new();

        for (idx, category) in Category::ALL.into_iter().enumerate() {
            collected.extend(self.discover(category, per_category).await);
            if collected.len() >= limit {
                break;
            }
            if idx + 1 < Category::ALL.len() {
                tokio::time::sleep(self.category_pause).await;
            }
        }

        collected.truncate(limit);
        tracing::info!(count = collected.len(), "multi-category discovery complete");
        collected
    }

    /// Listings from a deals-oriented search, tagged `"deals"`. The
    /// fallback mixes listings from the first three categories, each tagged
    /// with its own category.
    pub async fn discover_hot_deals(&self, limit: usize) -> Vec<DiscoveredProduct> {
        if limit == 0 {
            return Vec::new();
        }

        let query = self.pick(DEAL_SEARCH_TERMS);
        tracing::info!(query, limit, "discovering hot deals");

        match self.source.search_products(query, limit).await {
            Ok(products) if !products.is_empty() => products
                .into_iter()
                .take(limit)
                .map(|p| p.into_discovered(DEALS_CATEGORY))
                .collect(),
            Ok(_) => {
                tracing::warn!(query, "deal search returned no listings; using mixed fallback");
                mixed_deals_fallback(limit)
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "deal search failed; using mixed fallback");
                mixed_deals_fallback(limit)
            }
        }
    }

    fn pick(&self, phrases: &'static [&'static str]) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        phrases.choose(&mut *rng).copied().unwrap_or_default()
    }
}

fn mixed_deals_fallback(limit: usize) -> Vec<DiscoveredProduct> {
    Category::ALL
        .into_iter()
        .take(DEALS_FALLBACK_CATEGORIES)
        .flat_map(|category| {
            fallback_products(category)
                .into_iter()
                .take(DEALS_FALLBACK_PER_CATEGORY)
                .map(move |p| p.into_discovered(category.as_str()))
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
