use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Desktop browser user agents; one is chosen at random for every attempt.
pub(crate) const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Lower-case phrases that only appear on anti-bot interstitials.
pub(crate) const BLOCK_INDICATORS: [&str; 7] = [
    "robot check",
    "captcha",
    "automated access",
    "api-services-support@amazon",
    "sorry, we just need to make sure",
    "enter the characters you see below",
    "type the characters",
];

/// Headers sent with every request, apart from `User-Agent`.
///
/// `Accept-Encoding` is left to reqwest, which only advertises encodings it
/// can decode.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-IN,en-GB;q=0.9,en;q=0.8,hi;q=0.7"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    for (name, value) in [
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-user", "?1"),
    ] {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers
}

/// Returns the first block indicator found in `body`, if any.
pub(crate) fn detect_block(body: &str) -> Option<&'static str> {
    let lower = body.to_lowercase();
    BLOCK_INDICATORS
        .into_iter()
        .find(|indicator| lower.contains(indicator))
}
