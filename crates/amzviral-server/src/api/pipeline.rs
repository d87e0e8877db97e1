//! Per-product processing shared by discovery and single-product automation:
//! render, export, persist.

use amzviral_core::ProductRecord;
use amzviral_db::{AutomationRecord, NewAutomation};
use amzviral_messages::{affiliate_url, render_messages, RenderedMessages};
use amzviral_sheets::SheetRow;
use chrono::Utc;
use uuid::Uuid;

use super::{ApiError, AppState};

/// A trimmed, non-empty affiliate tag.
///
/// Checked at the request boundary so a bad tag is rejected before the quota
/// gate or any scraping runs.
pub(super) fn validate_affiliate_tag<'a>(
    req_id: &str,
    tag: &'a str,
) -> Result<&'a str, ApiError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "affiliateTag must not be empty",
        ));
    }
    Ok(tag)
}

pub(super) struct ProcessedProduct {
    pub messages: RenderedMessages,
    pub automation: AutomationRecord,
}

pub(super) struct ProductJob<'a> {
    pub user_id: Uuid,
    pub product: &'a ProductRecord,
    /// URL stored on the automation record.
    pub product_url: &'a str,
    pub affiliate_tag: &'a str,
    pub spreadsheet_id: Option<&'a str>,
}

/// Renders both messages, appends a sheet row when a spreadsheet is bound,
/// and records the automation.
///
/// Sheet failures are logged and do not fail the product.
pub(super) async fn process_product(
    state: &AppState,
    req_id: &str,
    job: ProductJob<'_>,
) -> Result<ProcessedProduct, ApiError> {
    let messages = state
        .with_rng(|rng| render_messages(job.product, job.affiliate_tag, rng))
        .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))?;

    if let (Some(sheets), Some(spreadsheet_id)) = (&state.sheets, job.spreadsheet_id) {
        let row = SheetRow::for_product(
            job.product,
            Utc::now().to_rfc3339(),
            affiliate_url(&job.product.canonical_url, job.affiliate_tag),
            &messages.whatsapp_message,
            &messages.telegram_message,
            job.affiliate_tag,
        );
        if let Err(e) = sheets.append_row(spreadsheet_id, &row).await {
            tracing::warn!(
                error = %e,
                spreadsheet_id,
                title = %job.product.title,
                "spreadsheet export failed; continuing without it"
            );
        }
    }

    let automation = amzviral_db::create_automation(
        &state.store,
        NewAutomation {
            user_id: job.user_id,
            product_url: job.product_url.to_owned(),
            product_title: job.product.title.clone(),
            price: job.product.price.clone(),
            rating: job.product.rating_label(),
            whatsapp_message: messages.whatsapp_message.clone(),
            telegram_message: messages.telegram_message.clone(),
            affiliate_tag: job.affiliate_tag.to_owned(),
            spreadsheet_id: job.spreadsheet_id.map(ToOwned::to_owned),
        },
    )
    .await;

    Ok(ProcessedProduct {
        messages,
        automation,
    })
}
