use amzviral_core::DiscoveredProduct;
use amzviral_scraper::DiscoveryTarget;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::middleware::{CurrentUser, RequestId};

use super::access::admit;
use super::pipeline::{process_product, validate_affiliate_tag, ProductJob};
use super::{json_body, spreadsheet_url, ApiError, AppState};

const DEFAULT_LIMIT: u32 = 5;
const MAX_LIMIT: u32 = 100;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct DiscoverRequest {
    /// A category id, `"all"`, or `"hot"`.
    pub category: String,
    pub affiliate_tag: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct DiscoverResult {
    pub product: DiscoveredProduct,
    pub whatsapp_message: String,
    pub telegram_message: String,
    pub automation_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct DiscoverResponse {
    pub success: bool,
    pub count: usize,
    pub spreadsheet_id: Option<String>,
    pub spreadsheet_url: Option<String>,
    pub results: Vec<DiscoverResult>,
    pub daily_count: u32,
    pub remaining: i64,
    pub daily_limit: u32,
}

/// POST /api/discover: Find products and process each one.
pub(in crate::api) async fn discover(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<DiscoverRequest>, JsonRejection>,
) -> Result<Json<DiscoverResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, payload)?;

    let target: DiscoveryTarget = body
        .category
        .parse()
        .map_err(|e: String| ApiError::new(rid, "validation_error", e))?;
    let tag = validate_affiliate_tag(rid, &body.affiliate_tag)?;
    if body.limit == 0 || body.limit > MAX_LIMIT {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!("limit must be between 1 and {MAX_LIMIT}"),
        ));
    }

    admit(&state, rid, &user, body.limit, Utc::now()).await?;

    tracing::info!(user_id = %user.id, %target, limit = body.limit, "discovery requested");
    let limit = usize::try_from(body.limit).unwrap_or(usize::MAX);
    let discovered = state.discovery.run(target, limit).await;
    if discovered.is_empty() {
        return Err(ApiError::new(
            rid,
            "not_found",
            "No products found for this category. Amazon may be rate limiting requests.",
        ));
    }

    let spreadsheet_id = user.spreadsheet_id.clone();
    let mut results = Vec::with_capacity(discovered.len());
    for item in discovered {
        let processed = process_product(
            &state,
            rid,
            ProductJob {
                user_id: user.id,
                product: &item.product,
                product_url: &item.product.canonical_url,
                affiliate_tag: tag,
                spreadsheet_id: spreadsheet_id.as_deref(),
            },
        )
        .await?;

        results.push(DiscoverResult {
            whatsapp_message: processed.messages.whatsapp_message,
            telegram_message: processed.messages.telegram_message,
            automation_id: processed.automation.id,
            product: item,
        });
    }

    let status = state.quota.status(&state.store, user.id, Utc::now()).await;
    tracing::info!(user_id = %user.id, count = results.len(), "discovery complete");

    Ok(Json(DiscoverResponse {
        success: true,
        count: results.len(),
        spreadsheet_url: spreadsheet_id.as_deref().map(spreadsheet_url),
        spreadsheet_id,
        results,
        daily_count: status.count,
        remaining: status.remaining,
        daily_limit: status.limit,
    }))
}
