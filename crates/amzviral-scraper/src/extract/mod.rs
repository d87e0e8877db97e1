//! Markup extraction for product pages and search-results pages.
//!
//! Each field is read through an ordered list of selectors; the first one
//! that yields non-empty text wins.

mod price;
mod product;
mod search;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

pub use product::extract_product;
pub use search::extract_search_results;

static LEADING_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("valid regex"));

static GROUPED_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("valid regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

fn selectors(css: &[&str]) -> Vec<Selector> {
    css.iter().map(|c| selector(c)).collect()
}

/// Element text with runs of whitespace collapsed to single spaces.
fn text_content(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching `sel`, if it is non-empty.
fn first_text(scope: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .map(|el| text_content(&el))
        .filter(|t| !t.is_empty())
}

/// First non-empty text across `sels`, tried in order.
fn first_text_of(scope: &ElementRef<'_>, sels: &[Selector]) -> Option<String> {
    sels.iter().find_map(|sel| first_text(scope, sel))
}

/// Non-empty `attr` of the first element matching `sel`.
fn first_attr(scope: &ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Leading decimal in a label like `"4.1 out of 5 stars"`, clamped to 0–5.
fn parse_rating(text: &str) -> f64 {
    LEADING_DECIMAL
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map_or(0.0, |r| r.clamp(0.0, 5.0))
}

/// First comma-grouped integer in a label like `"2,45,678 ratings"`.
fn parse_review_count(text: &str) -> u64 {
    GROUPED_INTEGER
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse::<u64>().ok())
        .unwrap_or(0)
}
