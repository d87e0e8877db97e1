use std::sync::LazyLock;

use amzviral_core::ProductRecord;
use scraper::{Html, Selector};

use super::price::{clean_whole, compute_discount, format_rupees};
use super::{first_attr, first_text, parse_rating, parse_review_count, selector};
use crate::asin::{canonical_url, is_asin};

static RESULT: LazyLock<Selector> = LazyLock::new(|| selector("div[data-asin]"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        "h2 a span, .a-size-medium.a-color-base.a-text-normal, .a-size-base-plus.a-color-base.a-text-normal",
    )
});
static PRICE_WHOLE: LazyLock<Selector> = LazyLock::new(|| selector(".a-price-whole"));
static ORIGINAL_PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector(".a-price.a-text-price .a-offscreen"));
static RATING: LazyLock<Selector> = LazyLock::new(|| selector(".a-icon-alt"));
static REVIEWS: LazyLock<Selector> =
    LazyLock::new(|| selector(r#".a-size-base.s-underline-text, [aria-label*="stars"]"#));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("img.s-image"));

/// Listings shorter than this are ad slots or sponsored widgets.
const MIN_TITLE_CHARS: usize = 10;

/// Extracts up to `limit` listings from a search-results page.
///
/// Containers without a valid ASIN, a title of at least ten characters, or
/// a whole-rupee price are skipped. Search listings carry no feature bullets.
#[must_use]
pub fn extract_search_results(html: &str, limit: usize) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let mut products = Vec::new();

    for container in document.select(&RESULT) {
        if products.len() >= limit {
            break;
        }

        let Some(asin) = container.value().attr("data-asin").map(str::trim) else {
            continue;
        };
        if !is_asin(asin) {
            continue;
        }

        let Some(title) = first_text(&container, &TITLE)
            .filter(|t| t.chars().count() >= MIN_TITLE_CHARS)
        else {
            continue;
        };

        let Some(whole) = first_text(&container, &PRICE_WHOLE)
            .map(|w| clean_whole(&w))
            .filter(|w| !w.is_empty())
        else {
            continue;
        };
        let price = format_rupees(&whole, None);

        let original_price =
            first_text(&container, &ORIGINAL_PRICE).unwrap_or_else(|| price.clone());
        let discount = compute_discount(&price, &original_price);

        let rating = first_text(&container, &RATING).map_or(0.0, |t| parse_rating(&t));
        let review_count =
            first_text(&container, &REVIEWS).map_or(0, |t| parse_review_count(&t));
        let image_url = first_attr(&container, &IMAGE, "src");

        products.push(ProductRecord {
            title,
            price,
            original_price,
            discount,
            rating,
            review_count,
            image_url,
            features: Vec::new(),
            canonical_url: canonical_url(asin),
            source_id: asin.to_owned(),
        });
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(asin: &str, title: &str, whole: Option<&str>, mrp: Option<&str>) -> String {
        let price = whole
            .map(|w| format!(r#"<span class="a-price"><span class="a-price-whole">{w}</span></span>"#))
            .unwrap_or_default();
        let mrp = mrp
            .map(|m| {
                format!(r#"<span class="a-price a-text-price"><span class="a-offscreen">{m}</span></span>"#)
            })
            .unwrap_or_default();
        format!(
            r#"<div data-asin="{asin}" class="s-result-item">
                <img class="s-image" src="https://m.media-amazon.com/images/I/{asin}.jpg">
                <h2><a href="/dp/{asin}"><span>{title}</span></a></h2>
                {price}{mrp}
                <span class="a-icon-alt">4.2 out of 5 stars</span>
                <span class="a-size-base s-underline-text">23,456</span>
            </div>"#
        )
    }

    fn results_page(items: &[String]) -> String {
        format!(
            r#"<html><body><div class="s-main-slot">{}</div></body></html>"#,
            items.concat()
        )
    }

    #[test]
    fn extracts_listing_fields() {
        let html = results_page(&[result(
            "B0B7QWFBVH",
            "Boldfit Yoga Mat for Women and Men",
            Some("299."),
            Some("₹999"),
        )]);

        let products = extract_search_results(&html, 5);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.title, "Boldfit Yoga Mat for Women and Men");
        assert_eq!(p.price, "₹299");
        assert_eq!(p.original_price, "₹999");
        assert_eq!(p.discount.as_deref(), Some("70% OFF"));
        assert!((p.rating - 4.2).abs() < f64::EPSILON);
        assert_eq!(p.review_count, 23_456);
        assert_eq!(
            p.image_url.as_deref(),
            Some("https://m.media-amazon.com/images/I/B0B7QWFBVH.jpg")
        );
        assert!(p.features.is_empty());
        assert_eq!(p.canonical_url, "https://www.amazon.in/dp/B0B7QWFBVH");
    }

    #[test]
    fn skips_invalid_asins_short_titles_and_missing_prices() {
        let html = results_page(&[
            result("", "Sponsored carousel heading", Some("100"), None),
            result("B0SHORT", "Too short asin listing", Some("100"), None),
            result("B0845XSLTV", "Ad slot", Some("199"), None),
            result("B09JQMJHXY", "Prestige Omega Deluxe Kitchen Set", None, None),
            result("B08R68T5RG", "Philips Air Purifier AC0819/20", Some("6,999"), None),
        ]);

        let products = extract_search_results(&html, 10);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].source_id, "B08R68T5RG");
        assert_eq!(products[0].price, "₹6999");
        assert_eq!(products[0].original_price, "₹6999");
        assert_eq!(products[0].discount, None);
    }

    #[test]
    fn stops_at_limit() {
        let items: Vec<String> = [
            "B0000000A1",
            "B0000000A2",
            "B0000000A3",
            "B0000000A4",
        ]
        .iter()
        .map(|asin| result(asin, "Wireless earbuds with long battery", Some("999"), None))
        .collect();

        let products = extract_search_results(&results_page(&items), 2);
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].source_id, "B0000000A2");
    }

    #[test]
    fn empty_page_yields_no_products() {
        assert!(extract_search_results("<html><body></body></html>", 5).is_empty());
    }
}
