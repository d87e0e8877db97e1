use std::net::SocketAddr;

use crate::QuotaWindow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub amazon_base_url: String,
    pub scraper_timeout_secs: u64,
    pub scraper_max_redirects: usize,
    pub scraper_max_attempts: u32,
    pub scraper_attempt_delay_ms: u64,
    pub scraper_backoff_delay_ms: u64,
    pub discovery_category_pause_ms: u64,
    pub quota_limit: u32,
    pub quota_window: QuotaWindow,
    /// Lower-cased emails that bypass the payment and quota gates.
    pub owner_emails: Vec<String>,
    /// Lower-cased usernames that bypass the payment and quota gates.
    pub owner_usernames: Vec<String>,
    pub require_payment: bool,
    pub sheets_access_token: Option<String>,
    pub sheets_api_base: String,
    pub payment_key_id: String,
}

impl AppConfig {
    /// Whether a user with this username/email is on the owner allow-list.
    #[must_use]
    pub fn is_owner(&self, username: &str, email: Option<&str>) -> bool {
        let username = username.to_lowercase();
        self.owner_usernames.iter().any(|u| *u == username)
            || email.is_some_and(|e| {
                let e = e.to_lowercase();
                self.owner_emails.iter().any(|o| *o == e)
            })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("amazon_base_url", &self.amazon_base_url)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("scraper_max_redirects", &self.scraper_max_redirects)
            .field("scraper_max_attempts", &self.scraper_max_attempts)
            .field("scraper_attempt_delay_ms", &self.scraper_attempt_delay_ms)
            .field("scraper_backoff_delay_ms", &self.scraper_backoff_delay_ms)
            .field(
                "discovery_category_pause_ms",
                &self.discovery_category_pause_ms,
            )
            .field("quota_limit", &self.quota_limit)
            .field("quota_window", &self.quota_window)
            .field("owner_emails", &self.owner_emails)
            .field("owner_usernames", &self.owner_usernames)
            .field("require_payment", &self.require_payment)
            .field(
                "sheets_access_token",
                &self.sheets_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("sheets_api_base", &self.sheets_api_base)
            .field("payment_key_id", &self.payment_key_id)
            .finish()
    }
}
