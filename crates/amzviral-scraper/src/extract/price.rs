use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder used when no price can be found on a product page.
pub(super) const ZERO_PRICE: &str = "₹0";

/// Numeric value of a display price such as `"₹1,299.00"`.
pub(super) fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Strips the grouping commas and the trailing separator dot that the
/// `a-price-whole` span carries (`"1,299."` becomes `"1299"`).
pub(super) fn clean_whole(raw: &str) -> String {
    raw.replace(',', "").trim().trim_end_matches('.').to_owned()
}

/// `₹<whole>` or `₹<whole>.<fraction>`.
pub(super) fn format_rupees(whole: &str, fraction: Option<&str>) -> String {
    match fraction.map(str::trim).filter(|f| !f.is_empty()) {
        Some(fraction) => format!("₹{whole}.{fraction}"),
        None => format!("₹{whole}"),
    }
}

/// Normalises an explicit savings marker like `"-71%"` to `"71% OFF"`.
pub(super) fn savings_label(raw: &str) -> Option<String> {
    let pct = raw
        .trim()
        .trim_start_matches('-')
        .trim_end_matches('%')
        .trim();
    (!pct.is_empty()).then(|| format!("{pct}% OFF"))
}

/// `"<n>% OFF"` where `n = round((original - price) / original * 100)`,
/// rounding halves away from zero.
///
/// Absent unless both amounts parse and `original > price > 0`.
pub(super) fn compute_discount(price: &str, original: &str) -> Option<String> {
    let price = parse_amount(price)?;
    let original = parse_amount(original)?;
    if price <= Decimal::ZERO || original <= price {
        return None;
    }

    let pct = ((original - price) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()?;
    Some(format!("{pct}% OFF"))
}
