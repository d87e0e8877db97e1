use std::sync::LazyLock;

use amzviral_core::ProductRecord;
use scraper::{Html, Selector};

use super::price::{
    clean_whole, compute_discount, format_rupees, savings_label, ZERO_PRICE,
};
use super::{
    first_attr, first_text, first_text_of, parse_rating, parse_review_count, selector, selectors,
    text_content,
};
use crate::asin::canonical_url;
use crate::error::ScraperError;

static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        "#productTitle",
        "h1.a-size-large",
        "span.product-title-word-break",
    ])
});
static PRICE_WHOLE: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-whole"));
static PRICE_FRACTION: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-fraction"));
static ALT_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    selector("#priceblock_ourprice, #priceblock_dealprice, .a-price .a-offscreen")
});
static ORIGINAL_PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        ".a-text-price .a-offscreen",
        ".a-price.a-text-price span.a-offscreen",
    ])
});
static SAVINGS: LazyLock<Selector> = LazyLock::new(|| selector(".savingsPercentage"));
static RATING: LazyLock<Selector> = LazyLock::new(|| selector("span.a-icon-alt"));
static REVIEWS: LazyLock<Selector> = LazyLock::new(|| selector("#acrCustomerReviewText"));
static IMAGE: LazyLock<Vec<Selector>> =
    LazyLock::new(|| selectors(&["#landingImage", "#imgBlkFront", ".a-dynamic-image"]));
static FEATURES: LazyLock<Selector> =
    LazyLock::new(|| selector("#feature-bullets ul li span.a-list-item"));

/// Extracts a [`ProductRecord`] from a product detail page.
///
/// Missing optional fields degrade to defaults: the price falls back to
/// `"₹0"`, the original price to the price, rating and reviews to zero.
/// A `"₹0"` placeholder price never gets a computed discount.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] when no title selector matches, which
/// usually means the markup changed or the page was an interstitial.
pub fn extract_product(html: &str, asin: &str) -> Result<ProductRecord, ScraperError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = first_text_of(&root, &TITLE).ok_or_else(|| ScraperError::Parse {
        reason: format!("no product title found for {asin}; the page may be blocked"),
    })?;

    let whole = first_text(&root, &PRICE_WHOLE)
        .map(|w| clean_whole(&w))
        .filter(|w| !w.is_empty());
    let price = match whole {
        Some(whole) => format_rupees(&whole, first_text(&root, &PRICE_FRACTION).as_deref()),
        None => first_text(&root, &ALT_PRICE).unwrap_or_else(|| ZERO_PRICE.to_owned()),
    };

    let original_price = first_text_of(&root, &ORIGINAL_PRICE).unwrap_or_else(|| price.clone());

    let discount = first_text(&root, &SAVINGS)
        .and_then(|s| savings_label(&s))
        .or_else(|| compute_discount(&price, &original_price));

    let rating = first_text(&root, &RATING).map_or(0.0, |t| parse_rating(&t));
    let review_count = first_text(&root, &REVIEWS).map_or(0, |t| parse_review_count(&t));

    let image_url = IMAGE.iter().find_map(|sel| first_attr(&root, sel, "src"));

    let features = root
        .select(&FEATURES)
        .map(|el| text_content(&el))
        .filter(|f| !f.contains("See more") && f.chars().count() > 5)
        .take(ProductRecord::MAX_FEATURES)
        .collect();

    Ok(ProductRecord {
        title,
        price,
        original_price,
        discount,
        rating,
        review_count,
        image_url,
        features,
        canonical_url: canonical_url(asin),
        source_id: asin.to_owned(),
    })
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
