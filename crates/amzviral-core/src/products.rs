use serde::{Deserialize, Serialize};

/// A product listing scraped from a product or search-results page, or taken
/// from the static fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    /// Currency-formatted price, e.g. `"₹1,299"`.
    pub price: String,
    /// MRP as shown on the listing; equals `price` when no MRP was found.
    pub original_price: String,
    /// Human-readable discount label such as `"71% OFF"`.
    pub discount: Option<String>,
    /// Star rating on a 0–5 scale; `0.0` when unknown.
    pub rating: f64,
    pub review_count: u64,
    pub image_url: Option<String>,
    /// Bullet-point features, at most [`ProductRecord::MAX_FEATURES`].
    pub features: Vec<String>,
    /// Canonical `https://www.amazon.in/dp/<ASIN>` link.
    pub canonical_url: String,
    /// 10-character alphanumeric ASIN.
    pub source_id: String,
}

impl ProductRecord {
    pub const MAX_FEATURES: usize = 5;

    /// Attaches a category tag, producing the discovery-facing shape.
    #[must_use]
    pub fn into_discovered(self, category: impl Into<String>) -> DiscoveredProduct {
        DiscoveredProduct {
            product: self,
            category: category.into(),
        }
    }

    /// `"4.1/5"` as stored on automation records.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{}/5", self.rating)
    }
}

/// A [`ProductRecord`] tagged with the category it was discovered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredProduct {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub category: String,
}
