//! Mocked payment collaborator: order creation echoes a synthetic order id,
//! verification activates a 30-day subscription.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::{CurrentUser, RequestId};

use super::{map_db_error, ApiError, AppState};

const SUBSCRIPTION_DAYS: i64 = 30;

#[derive(Debug, Default, Deserialize)]
pub(in crate::api) struct CreateOrderRequest {
    pub amount: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct CreateOrderResponse {
    pub order_id: String,
    pub key_id: String,
    pub amount: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub subscription_ends_at: Option<DateTime<Utc>>,
}

/// POST /api/payment/create-order
pub(in crate::api) async fn create_order(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Json<CreateOrderResponse> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();
    let order_id = format!("order_{}", Utc::now().timestamp_millis());
    tracing::info!(user_id = %user.id, %order_id, amount = ?body.amount, "payment order created");

    Json(CreateOrderResponse {
        order_id,
        key_id: state.config.payment_key_id.clone(),
        amount: body.amount,
    })
}

/// POST /api/payment/verify
pub(in crate::api) async fn verify(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let updated =
        amzviral_db::mark_user_paid(&state.store, user.id, Utc::now(), SUBSCRIPTION_DAYS)
            .await
            .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(VerifyResponse {
        success: true,
        message: format!("Subscription activated for {SUBSCRIPTION_DAYS} days"),
        subscription_ends_at: updated.subscription_ends_at,
    }))
}
