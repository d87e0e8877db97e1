use amzviral_core::ProductRecord;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::format::{affiliate_url, format_indian_number, format_inr, truncate_chars};
use crate::phrases::{CLOSINGS, HOOKS, TELEGRAM_HASHTAGS, WHATSAPP_HASHTAGS};
use crate::MessageError;

const WHATSAPP_TITLE_CHARS: usize = 80;
const WHATSAPP_FEATURES: usize = 3;
const WHATSAPP_FEATURE_CHARS: usize = 60;
const TELEGRAM_FEATURES: usize = 4;
const TELEGRAM_FEATURE_CHARS: usize = 70;

/// Both platform renderings for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMessages {
    pub whatsapp_message: String,
    pub telegram_message: String,
}

/// Renders the WhatsApp and Telegram messages for `product`.
///
/// # Errors
///
/// Returns [`MessageError::EmptyAffiliateTag`] for a blank tag.
pub fn render_messages<R: Rng + ?Sized>(
    product: &ProductRecord,
    affiliate_tag: &str,
    rng: &mut R,
) -> Result<RenderedMessages, MessageError> {
    Ok(RenderedMessages {
        whatsapp_message: render_whatsapp(product, affiliate_tag, rng)?,
        telegram_message: render_telegram(product, affiliate_tag, rng)?,
    })
}

/// WhatsApp flavour: `*bold*`, `~strike~`, title cut at 80 characters,
/// up to three features cut at 60.
///
/// # Errors
///
/// Returns [`MessageError::EmptyAffiliateTag`] for a blank tag.
pub fn render_whatsapp<R: Rng + ?Sized>(
    product: &ProductRecord,
    affiliate_tag: &str,
    rng: &mut R,
) -> Result<String, MessageError> {
    let tag = validated_tag(affiliate_tag)?;
    let (hook, closing) = pick_phrases(rng);
    let link = affiliate_url(&product.canonical_url, tag);
    let title = truncate_chars(&product.title, WHATSAPP_TITLE_CHARS);

    let mut msg = format!("{hook} 🔥\n\n*{title}*\n\n");

    if shows_original_price(product) {
        msg.push_str(&format!("❌ ~MRP: {}~\n", format_inr(&product.original_price)));
    }
    msg.push_str(&format!("✅ *Deal Price: {}*", format_inr(&product.price)));
    if let Some(discount) = &product.discount {
        msg.push_str(&format!(" ({discount})"));
    }
    msg.push_str("\n\n");

    if let Some(rating) = rating_line(product, "⭐ *Rating:*") {
        msg.push_str(&rating);
        msg.push_str("\n\n");
    }

    if !product.features.is_empty() {
        msg.push_str("✨ *Features:*\n");
        msg.push_str(&feature_lines(
            &product.features,
            "•",
            WHATSAPP_FEATURES,
            WHATSAPP_FEATURE_CHARS,
        ));
        msg.push_str("\n\n");
    }

    msg.push_str(&format!(
        "🛒 *BUY NOW:*\n{link}\n\n{closing}\n\n{WHATSAPP_HASHTAGS}"
    ));
    Ok(msg)
}

/// Telegram flavour: `**bold**`, `~~strike~~`, full title, a markdown link,
/// up to four features cut at 70.
///
/// # Errors
///
/// Returns [`MessageError::EmptyAffiliateTag`] for a blank tag.
pub fn render_telegram<R: Rng + ?Sized>(
    product: &ProductRecord,
    affiliate_tag: &str,
    rng: &mut R,
) -> Result<String, MessageError> {
    let tag = validated_tag(affiliate_tag)?;
    let (hook, closing) = pick_phrases(rng);
    let link = affiliate_url(&product.canonical_url, tag);

    let mut msg = format!("{hook} 🚀\n\n**{}**\n\n", product.title);

    if shows_original_price(product) {
        msg.push_str(&format!(
            "💸 ~~MRP: {}~~\n",
            format_inr(&product.original_price)
        ));
    }
    msg.push_str(&format!("💰 **Deal Price:** {}", format_inr(&product.price)));
    if let Some(discount) = &product.discount {
        msg.push_str(&format!(" 🏷️ {discount}"));
    }
    msg.push_str("\n\n");

    if let Some(rating) = rating_line(product, "⭐ **Rating:**") {
        msg.push_str(&rating);
        msg.push_str("\n\n");
    }

    if !product.features.is_empty() {
        msg.push_str("✨ **Key Features:**\n");
        msg.push_str(&feature_lines(
            &product.features,
            "🔹",
            TELEGRAM_FEATURES,
            TELEGRAM_FEATURE_CHARS,
        ));
        msg.push_str("\n\n");
    }

    msg.push_str(&format!(
        "🛒 **ORDER NOW:** [Click Here]({link})\n\n{closing}\n\n{TELEGRAM_HASHTAGS}"
    ));
    Ok(msg)
}

fn validated_tag(tag: &str) -> Result<&str, MessageError> {
    let tag = tag.trim();
    if tag.is_empty() {
        Err(MessageError::EmptyAffiliateTag)
    } else {
        Ok(tag)
    }
}

fn pick_phrases<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let hook = HOOKS.choose(rng).copied().unwrap_or(HOOKS[0]);
    let closing = CLOSINGS.choose(rng).copied().unwrap_or(CLOSINGS[0]);
    (hook, closing)
}

fn shows_original_price(product: &ProductRecord) -> bool {
    !product.original_price.is_empty() && product.original_price != product.price
}

fn rating_line(product: &ProductRecord, label: &str) -> Option<String> {
    if product.rating <= 0.0 {
        return None;
    }
    let mut line = format!("{label} {}/5", product.rating);
    if product.review_count > 0 {
        line.push_str(&format!(
            " ({} reviews)",
            format_indian_number(product.review_count)
        ));
    }
    Some(line)
}

fn feature_lines(features: &[String], bullet: &str, max: usize, max_chars: usize) -> String {
    features
        .iter()
        .take(max)
        .map(|f| format!("{bullet} {}", truncate_chars(f, max_chars)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
