use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, QuotaWindow};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_list = |var: &str| -> Vec<String> {
        lookup(var)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect()
    };

    let env = parse_environment(&or_default("AMZVIRAL_ENV", "development"))?;

    let bind_addr = or_default("AMZVIRAL_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("AMZVIRAL_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("AMZVIRAL_LOG_LEVEL", "info");

    let amazon_base_url = or_default("AMZVIRAL_AMAZON_BASE_URL", "https://www.amazon.in")
        .trim_end_matches('/')
        .to_string();
    let scraper_timeout_secs = parse_u64("AMZVIRAL_SCRAPER_TIMEOUT_SECS", "20")?;
    let scraper_max_redirects = parse_usize("AMZVIRAL_SCRAPER_MAX_REDIRECTS", "5")?;
    let scraper_max_attempts = parse_u32("AMZVIRAL_SCRAPER_MAX_ATTEMPTS", "3")?;
    if scraper_max_attempts == 0 {
        return Err(invalid(
            "AMZVIRAL_SCRAPER_MAX_ATTEMPTS",
            "at least one attempt is required".to_string(),
        ));
    }
    let scraper_attempt_delay_ms = parse_u64("AMZVIRAL_SCRAPER_ATTEMPT_DELAY_MS", "1000")?;
    let scraper_backoff_delay_ms = parse_u64("AMZVIRAL_SCRAPER_BACKOFF_DELAY_MS", "2000")?;
    let discovery_category_pause_ms = parse_u64("AMZVIRAL_DISCOVERY_CATEGORY_PAUSE_MS", "1500")?;

    let quota_limit = parse_u32("AMZVIRAL_QUOTA_LIMIT", "50")?;
    let quota_window = or_default("AMZVIRAL_QUOTA_WINDOW", "daily")
        .parse::<QuotaWindow>()
        .map_err(|reason| invalid("AMZVIRAL_QUOTA_WINDOW", reason))?;

    let owner_emails = parse_list("AMZVIRAL_OWNER_EMAILS");
    let owner_usernames = parse_list("AMZVIRAL_OWNER_USERNAMES");
    let require_payment = parse_bool(&or_default("AMZVIRAL_REQUIRE_PAYMENT", "true"))
        .ok_or_else(|| invalid("AMZVIRAL_REQUIRE_PAYMENT", "expected true or false".to_string()))?;

    let sheets_access_token = lookup("AMZVIRAL_SHEETS_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let sheets_api_base = or_default("AMZVIRAL_SHEETS_API_BASE", "https://sheets.googleapis.com")
        .trim_end_matches('/')
        .to_string();
    let payment_key_id = or_default("AMZVIRAL_PAYMENT_KEY_ID", "rzp_test_key");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        amazon_base_url,
        scraper_timeout_secs,
        scraper_max_redirects,
        scraper_max_attempts,
        scraper_attempt_delay_ms,
        scraper_backoff_delay_ms,
        discovery_category_pause_ms,
        quota_limit,
        quota_window,
        owner_emails,
        owner_usernames,
        require_payment,
        sheets_access_token,
        sheets_api_base,
        payment_key_id,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AMZVIRAL_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
