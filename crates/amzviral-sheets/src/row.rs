use amzviral_core::ProductRecord;

/// The eight ordered columns written per product (`A:H`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub timestamp: String,
    pub product_title: String,
    pub price: String,
    /// `"<rating>/5 (<reviews> reviews)"`.
    pub rating: String,
    pub product_url: String,
    pub whatsapp_message: String,
    pub telegram_message: String,
    pub affiliate_tag: String,
}

impl SheetRow {
    /// Builds the row for `product`; `product_url` should already carry the
    /// affiliate tag.
    #[must_use]
    pub fn for_product(
        product: &ProductRecord,
        timestamp: String,
        product_url: String,
        whatsapp_message: &str,
        telegram_message: &str,
        affiliate_tag: &str,
    ) -> Self {
        Self {
            timestamp,
            product_title: product.title.clone(),
            price: product.price.clone(),
            rating: format!("{}/5 ({} reviews)", product.rating, product.review_count),
            product_url,
            whatsapp_message: whatsapp_message.to_owned(),
            telegram_message: telegram_message.to_owned(),
            affiliate_tag: affiliate_tag.to_owned(),
        }
    }

    /// Column values in sheet order.
    #[must_use]
    pub fn values(&self) -> [&str; 8] {
        [
            &self.timestamp,
            &self.product_title,
            &self.price,
            &self.rating,
            &self.product_url,
            &self.whatsapp_message,
            &self.telegram_message,
            &self.affiliate_tag,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_column_combines_rating_and_reviews() {
        let product = ProductRecord {
            title: "Boldfit Yoga Mat".to_string(),
            price: "₹299".to_string(),
            original_price: "₹999".to_string(),
            discount: Some("70% OFF".to_string()),
            rating: 4.2,
            review_count: 23_456,
            image_url: None,
            features: Vec::new(),
            canonical_url: "https://www.amazon.in/dp/B0B7QWFBVH".to_string(),
            source_id: "B0B7QWFBVH".to_string(),
        };
        let row = SheetRow::for_product(
            &product,
            "2026-01-01T00:00:00Z".to_string(),
            "https://www.amazon.in/dp/B0B7QWFBVH?tag=t-21".to_string(),
            "wa",
            "tg",
            "t-21",
        );

        assert_eq!(row.rating, "4.2/5 (23456 reviews)");
        assert_eq!(
            row.values(),
            [
                "2026-01-01T00:00:00Z",
                "Boldfit Yoga Mat",
                "₹299",
                "4.2/5 (23456 reviews)",
                "https://www.amazon.in/dp/B0B7QWFBVH?tag=t-21",
                "wa",
                "tg",
                "t-21",
            ]
        );
    }
}
