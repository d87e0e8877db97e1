use std::sync::LazyLock;

use regex::Regex;

/// Origin used for every canonical product link, independent of the origin
/// pages were actually fetched from.
pub const CANONICAL_ORIGIN: &str = "https://www.amazon.in";

/// URL shapes that carry an ASIN, tried in order.
static ASIN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)/dp/([A-Z0-9]{10})",
        r"(?i)/gp/product/([A-Z0-9]{10})",
        r"(?i)/gp/aw/d/([A-Z0-9]{10})",
        r"(?i)asin=([A-Z0-9]{10})",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Extracts the 10-character ASIN from an Amazon product URL.
///
/// Matching is case-insensitive; the returned ASIN is upper-cased.
#[must_use]
pub fn extract_asin(url: &str) -> Option<String> {
    ASIN_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// `https://www.amazon.in/dp/<asin>`.
#[must_use]
pub fn canonical_url(asin: &str) -> String {
    format!("{CANONICAL_ORIGIN}/dp/{asin}")
}

/// Whether `candidate` looks like an ASIN (10 ASCII alphanumerics).
pub(crate) fn is_asin(candidate: &str) -> bool {
    candidate.len() == 10 && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}
