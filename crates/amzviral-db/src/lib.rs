//! Process-lifetime record store for users and automation records, and the
//! product quota gate computed over it.
//!
//! Nothing here is persisted across restarts. The store is constructed once
//! by the binary and handed to every request handler.

pub mod automations;
pub mod quota;
pub mod store;
pub mod users;

pub use automations::{
    count_automations_since, create_automation, list_automations, AutomationRecord,
    NewAutomation,
};
pub use quota::{QuotaPolicy, QuotaStatus};
pub use store::MemoryStore;
pub use users::{
    create_user, get_user, get_user_by_email, mark_user_paid, set_reset_token, set_spreadsheet_id,
    NewUser, User,
};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DbError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),
    #[error("a user with this {field} already exists")]
    DuplicateUser { field: &'static str },
    #[error("quota exceeded: {count} of {limit} products used, {remaining} remaining")]
    QuotaExceeded {
        count: u32,
        limit: u32,
        remaining: i64,
    },
}
