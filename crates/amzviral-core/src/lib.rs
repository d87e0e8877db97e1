pub mod app_config;
pub mod categories;
pub mod config;
pub mod products;
pub mod quota;

pub use app_config::{AppConfig, Environment};
pub use categories::{Category, CategoryInfo, DEALS_CATEGORY, DEAL_SEARCH_TERMS};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{DiscoveredProduct, ProductRecord};
pub use quota::{QuotaWindow, MAX_ROLLING_DAYS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
