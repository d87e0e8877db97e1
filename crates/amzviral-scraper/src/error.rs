use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("request to {url} was blocked by an anti-bot page (matched \"{indicator}\")")]
    Blocked {
        url: String,
        indicator: &'static str,
    },

    #[error("could not extract product details: {reason}")]
    Parse { reason: String },

    #[error("invalid product URL \"{url}\": no ASIN found")]
    InvalidProductUrl { url: String },

    #[error("invalid request: {0}")]
    Validation(String),
}
