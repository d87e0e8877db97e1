/// Appends `tag=<affiliate_tag>` to `url`, joining with `&` when the URL
/// already carries a query string.
#[must_use]
pub fn affiliate_url(url: &str, affiliate_tag: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}tag={affiliate_tag}")
}

/// Prefixes `₹` unless the price already carries it.
#[must_use]
pub fn format_inr(price: &str) -> String {
    if price.contains('₹') {
        price.to_owned()
    } else {
        format!("₹{price}")
    }
}

/// Groups digits the Indian way: the last three, then pairs
/// (`245678` becomes `2,45,678`).
#[must_use]
pub fn format_indian_number(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}
