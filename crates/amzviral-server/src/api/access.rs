//! Payment and quota gates applied before any product is processed.
//!
//! Owners bypass both gates. Everyone else must hold an active subscription
//! (when payment is required) and have room left in the quota window.

use amzviral_db::User;
use chrono::{DateTime, Utc};

use super::{map_db_error, ApiError, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Access {
    pub is_owner: bool,
    pub is_paid: bool,
}

impl Access {
    pub(super) fn of(state: &AppState, user: &User, now: DateTime<Utc>) -> Self {
        Self {
            is_owner: state.config.is_owner(&user.username, user.email.as_deref()),
            is_paid: has_active_subscription(user, now),
        }
    }
}

/// Paid, and the subscription (if dated) has not ended.
pub(super) fn has_active_subscription(user: &User, now: DateTime<Utc>) -> bool {
    user.is_paid && !matches!(user.subscription_ends_at, Some(end) if end <= now)
}

/// Admits a request for `requested` more products.
///
/// Rejects with `payment_required` or `quota_exceeded` before any scraping
/// happens.
pub(super) async fn admit(
    state: &AppState,
    req_id: &str,
    user: &User,
    requested: u32,
    now: DateTime<Utc>,
) -> Result<Access, ApiError> {
    let access = Access::of(state, user, now);
    if access.is_owner {
        tracing::debug!(user_id = %user.id, "owner bypasses payment and quota gates");
        return Ok(access);
    }

    if state.config.require_payment && !access.is_paid {
        tracing::warn!(user_id = %user.id, "payment required");
        return Err(ApiError::new(
            req_id,
            "payment_required",
            "an active subscription is required to process products",
        ));
    }

    state
        .quota
        .check(&state.store, user.id, requested, now)
        .await
        .map_err(|e| map_db_error(req_id, &e))?;
    Ok(access)
}
