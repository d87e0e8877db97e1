//! Per-user product quota over a configurable time window.
//!
//! The window is a single injected [`QuotaWindow`]; the same value drives
//! both the enforced check and every status report.

use amzviral_core::{AppConfig, QuotaWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::automations::count_automations_since;
use crate::{DbError, MemoryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub limit: u32,
    pub window: QuotaWindow,
}

/// A user's position within the current window.
///
/// `remaining` is `limit - count` and goes negative when a user is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub count: u32,
    pub limit: u32,
    pub remaining: i64,
}

impl QuotaPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            limit: config.quota_limit,
            window: config.quota_window,
        }
    }

    pub async fn status(
        &self,
        store: &MemoryStore,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> QuotaStatus {
        let since = self.window.start(now);
        let count = count_automations_since(store, user_id, since).await;
        QuotaStatus {
            count,
            limit: self.limit,
            remaining: i64::from(self.limit) - i64::from(count),
        }
    }

    pub async fn remaining_quota(
        &self,
        store: &MemoryStore,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> i64 {
        self.status(store, user_id, now).await.remaining
    }

    /// Admits a request for `requested` more products.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::QuotaExceeded`] when the window is already full or
    /// `requested` exceeds what remains.
    pub async fn check(
        &self,
        store: &MemoryStore,
        user_id: Uuid,
        requested: u32,
        now: DateTime<Utc>,
    ) -> Result<QuotaStatus, DbError> {
        let status = self.status(store, user_id, now).await;
        if status.count >= status.limit || i64::from(requested) > status.remaining {
            tracing::warn!(
                %user_id,
                count = status.count,
                limit = status.limit,
                requested,
                window = %self.window,
                "quota exceeded"
            );
            return Err(DbError::QuotaExceeded {
                count: status.count,
                limit: status.limit,
                remaining: status.remaining,
            });
        }
        Ok(status)
    }
}
