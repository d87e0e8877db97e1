use amzviral_db::AutomationRecord;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::middleware::{CurrentUser, RequestId};

use super::access::admit;
use super::pipeline::{process_product, validate_affiliate_tag, ProductJob};
use super::{json_body, map_scraper_error, spreadsheet_url, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct AutomateRequest {
    pub url: String,
    pub affiliate_tag: String,
    /// Overrides the user's bound spreadsheet for this request only.
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct AutomateResponse {
    pub success: bool,
    pub automation: AutomationRecord,
    pub spreadsheet_id: Option<String>,
    pub spreadsheet_url: Option<String>,
}

/// POST /api/automate: Scrape one product page and process it.
pub(in crate::api) async fn automate(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<AutomateRequest>, JsonRejection>,
) -> Result<Json<AutomateResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, payload)?;

    let url = body.url.trim();
    if url.is_empty() {
        return Err(ApiError::new(rid, "validation_error", "url must not be empty"));
    }
    let tag = validate_affiliate_tag(rid, &body.affiliate_tag)?;

    admit(&state, rid, &user, 1, Utc::now()).await?;

    let product = state
        .products
        .scrape_product(url)
        .await
        .map_err(|e| map_scraper_error(rid, &e))?;

    let spreadsheet_id = body
        .spreadsheet_id
        .filter(|id| !id.trim().is_empty())
        .or(user.spreadsheet_id);

    let processed = process_product(
        &state,
        rid,
        ProductJob {
            user_id: user.id,
            product: &product,
            product_url: url,
            affiliate_tag: tag,
            spreadsheet_id: spreadsheet_id.as_deref(),
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.id,
        asin = %product.source_id,
        automation_id = processed.automation.id,
        "product automated"
    );

    Ok(Json(AutomateResponse {
        success: true,
        automation: processed.automation,
        spreadsheet_url: spreadsheet_id.as_deref().map(spreadsheet_url),
        spreadsheet_id,
    }))
}
