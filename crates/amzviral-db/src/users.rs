//! User registry operations.
//!
//! Credentials live with the external auth collaborator; a user here is an
//! identity plus billing and spreadsheet state.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{DbError, MemoryStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub spreadsheet_id: Option<String>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub reset_token: Option<String>,
    #[serde(skip)]
    pub reset_token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
}

/// Registers a user under a fresh UUID.
///
/// Usernames and emails are unique, compared case-insensitively.
///
/// # Errors
///
/// Returns [`DbError::DuplicateUser`] when the username or email is taken.
pub async fn create_user(store: &MemoryStore, new: NewUser) -> Result<User, DbError> {
    let mut users = store.users.write().await;

    let username_lower = new.username.to_lowercase();
    if users
        .values()
        .any(|u| u.username.to_lowercase() == username_lower)
    {
        return Err(DbError::DuplicateUser { field: "username" });
    }
    if let Some(email) = &new.email {
        let email_lower = email.to_lowercase();
        if users
            .values()
            .any(|u| u.email.as_deref().is_some_and(|e| e.to_lowercase() == email_lower))
        {
            return Err(DbError::DuplicateUser { field: "email" });
        }
    }

    let user = User {
        id: Uuid::new_v4(),
        username: new.username,
        email: new.email,
        spreadsheet_id: None,
        is_paid: false,
        paid_at: None,
        subscription_ends_at: None,
        reset_token: None,
        reset_token_expiry: None,
        created_at: Utc::now(),
    };
    users.insert(user.id, user.clone());
    tracing::info!(user_id = %user.id, username = %user.username, "user created");
    Ok(user)
}

pub async fn get_user(store: &MemoryStore, user_id: Uuid) -> Option<User> {
    store.users.read().await.get(&user_id).cloned()
}

/// Case-insensitive email lookup.
pub async fn get_user_by_email(store: &MemoryStore, email: &str) -> Option<User> {
    let wanted = email.trim().to_lowercase();
    store
        .users
        .read()
        .await
        .values()
        .find(|u| u.email.as_deref().is_some_and(|e| e.to_lowercase() == wanted))
        .cloned()
}

/// Binds a spreadsheet id to the user.
///
/// # Errors
///
/// Returns [`DbError::UserNotFound`] for an unknown id.
pub async fn set_spreadsheet_id(
    store: &MemoryStore,
    user_id: Uuid,
    spreadsheet_id: &str,
) -> Result<User, DbError> {
    update_user(store, user_id, |u| {
        u.spreadsheet_id = Some(spreadsheet_id.to_owned());
    })
    .await
}

/// Marks the user paid, with the subscription ending `days` after `now`.
///
/// # Errors
///
/// Returns [`DbError::UserNotFound`] for an unknown id.
pub async fn mark_user_paid(
    store: &MemoryStore,
    user_id: Uuid,
    now: DateTime<Utc>,
    days: i64,
) -> Result<User, DbError> {
    let user = update_user(store, user_id, |u| {
        u.is_paid = true;
        u.paid_at = Some(now);
        u.subscription_ends_at = Some(now + Duration::days(days));
    })
    .await?;
    tracing::info!(%user_id, "subscription activated");
    Ok(user)
}

/// Stores a password-reset code that stops being valid at `expires_at`.
///
/// # Errors
///
/// Returns [`DbError::UserNotFound`] for an unknown id.
pub async fn set_reset_token(
    store: &MemoryStore,
    user_id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<User, DbError> {
    update_user(store, user_id, |u| {
        u.reset_token = Some(token.to_owned());
        u.reset_token_expiry = Some(expires_at);
    })
    .await
}

async fn update_user<F>(store: &MemoryStore, user_id: Uuid, apply: F) -> Result<User, DbError>
where
    F: FnOnce(&mut User),
{
    let mut users = store.users.write().await;
    let user = users
        .get_mut(&user_id)
        .ok_or(DbError::UserNotFound(user_id))?;
    apply(user);
    Ok(user.clone())
}
