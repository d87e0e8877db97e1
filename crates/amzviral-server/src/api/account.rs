//! User registry, account status, spreadsheet binding, and reset-code
//! issuance.

use amzviral_db::{AutomationRecord, NewUser};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::{CurrentUser, RequestId};

use super::access::Access;
use super::{json_body, map_db_error, ApiError, AppState};

const AUTOMATION_LIST_LIMIT: usize = 50;
const RESET_CODE_LEN: usize = 24;
const RESET_CODE_TTL_MINUTES: i64 = 60;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(in crate::api) struct CreateUserRequest {
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SheetsIdRequest {
    pub sheets_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct CreateUserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct ForgotPasswordResponse {
    pub success: bool,
    pub message: &'static str,
    /// Only present when the mailer could not deliver the code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct UserStatusResponse {
    pub is_paid: bool,
    pub is_owner: bool,
    pub daily_count: u32,
    pub remaining: i64,
    pub daily_limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct AutomationsResponse {
    pub automations: Vec<AutomationRecord>,
    #[serde(flatten)]
    pub status: UserStatusResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SheetsIdResponse {
    pub sheets_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SetSheetsIdResponse {
    pub success: bool,
    pub sheets_id: String,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct SheetsStatusResponse {
    pub connected: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users: Register an identity.
pub(in crate::api) async fn create_user(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, payload)?;

    let username = body.username.trim().to_owned();
    if username.is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "username must not be empty",
        ));
    }
    let email = body
        .email
        .map(|e| e.trim().to_owned())
        .filter(|e| !e.is_empty());
    if email.as_deref().is_some_and(|e| !e.contains('@')) {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "email must be a valid address",
        ));
    }

    let user = amzviral_db::create_user(&state.store, NewUser { username, email })
        .await
        .map_err(|e| map_db_error(rid, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user_id: user.id,
            username: user.username,
            email: user.email,
        }),
    ))
}

/// POST /api/auth/forgot-password: Issue a one-hour reset code.
pub(in crate::api) async fn forgot_password(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<ForgotPasswordResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, payload)?;

    let Some(user) = amzviral_db::get_user_by_email(&state.store, &body.email).await else {
        return Err(ApiError::new(rid, "validation_error", "Email not found"));
    };

    let code: String = state.with_rng(|rng| {
        (0..RESET_CODE_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
            .collect()
    });
    let expires_at = Utc::now() + Duration::minutes(RESET_CODE_TTL_MINUTES);
    amzviral_db::set_reset_token(&state.store, user.id, &code, expires_at)
        .await
        .map_err(|e| map_db_error(rid, &e))?;

    let to = user.email.as_deref().unwrap_or(body.email.trim());
    if state.mailer.send_reset_code(to, &code).await {
        tracing::info!(user_id = %user.id, "reset code mailed");
        return Ok(Json(ForgotPasswordResponse {
            success: true,
            message: "Password reset code sent to your email. Check your inbox.",
            reset_code: None,
            note: None,
        }));
    }

    tracing::warn!(user_id = %user.id, "mail unavailable; returning reset code in response");
    Ok(Json(ForgotPasswordResponse {
        success: true,
        message: "Recovery code generated.",
        reset_code: Some(code),
        note: Some("Email service not configured. Use the code shown."),
    }))
}

async fn status_for(state: &AppState, user: &amzviral_db::User) -> UserStatusResponse {
    let now = Utc::now();
    let access = Access::of(state, user, now);
    let quota = state.quota.status(&state.store, user.id, now).await;
    UserStatusResponse {
        is_paid: access.is_paid,
        is_owner: access.is_owner,
        daily_count: quota.count,
        remaining: quota.remaining,
        daily_limit: quota.limit,
    }
}

/// GET /api/user/status
pub(in crate::api) async fn user_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserStatusResponse> {
    Json(status_for(&state, &user).await)
}

/// GET /api/automations: The 50 most recent records, newest first.
pub(in crate::api) async fn list_automations(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<AutomationsResponse> {
    let automations =
        amzviral_db::list_automations(&state.store, user.id, AUTOMATION_LIST_LIMIT).await;
    Json(AutomationsResponse {
        automations,
        status: status_for(&state, &user).await,
    })
}

/// GET /api/user/sheets-id
pub(in crate::api) async fn get_sheets_id(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<SheetsIdResponse> {
    Json(SheetsIdResponse {
        sheets_id: user.spreadsheet_id.unwrap_or_default(),
    })
}

/// POST /api/user/sheets-id: Bind a spreadsheet to the caller.
pub(in crate::api) async fn set_sheets_id(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<SheetsIdRequest>, JsonRejection>,
) -> Result<Json<SetSheetsIdResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, payload)?;

    let Some(sheets_id) = body
        .sheets_id
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
    else {
        return Err(ApiError::new(rid, "validation_error", "sheetsId is required"));
    };

    amzviral_db::set_spreadsheet_id(&state.store, user.id, &sheets_id)
        .await
        .map_err(|e| map_db_error(rid, &e))?;
    tracing::info!(user_id = %user.id, spreadsheet_id = %sheets_id, "spreadsheet bound");

    Ok(Json(SetSheetsIdResponse {
        success: true,
        sheets_id,
    }))
}

/// GET /api/sheets/status
pub(in crate::api) async fn sheets_status(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<SheetsStatusResponse> {
    Json(SheetsStatusResponse {
        connected: user.spreadsheet_id.is_some(),
    })
}
