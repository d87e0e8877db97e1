//! Append-only automation records, one per product processed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::MemoryStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRecord {
    pub id: u64,
    pub user_id: Uuid,
    pub product_url: String,
    pub product_title: String,
    pub price: String,
    /// `"<rating>/5"`.
    pub rating: String,
    pub whatsapp_message: String,
    pub telegram_message: String,
    pub affiliate_tag: String,
    pub spreadsheet_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAutomation {
    pub user_id: Uuid,
    pub product_url: String,
    pub product_title: String,
    pub price: String,
    pub rating: String,
    pub whatsapp_message: String,
    pub telegram_message: String,
    pub affiliate_tag: String,
    pub spreadsheet_id: Option<String>,
}

/// Appends a record stamped with the current time.
pub async fn create_automation(store: &MemoryStore, new: NewAutomation) -> AutomationRecord {
    insert_automation_at(store, new, Utc::now()).await
}

pub(crate) async fn insert_automation_at(
    store: &MemoryStore,
    new: NewAutomation,
    created_at: DateTime<Utc>,
) -> AutomationRecord {
    let mut automations = store.automations.write().await;
    let record = AutomationRecord {
        id: store.next_automation_id(),
        user_id: new.user_id,
        product_url: new.product_url,
        product_title: new.product_title,
        price: new.price,
        rating: new.rating,
        whatsapp_message: new.whatsapp_message,
        telegram_message: new.telegram_message,
        affiliate_tag: new.affiliate_tag,
        spreadsheet_id: new.spreadsheet_id,
        created_at,
    };
    automations.push(record.clone());
    tracing::debug!(automation_id = record.id, user_id = %record.user_id, "automation recorded");
    record
}

/// The user's `limit` most recent records, newest first.
pub async fn list_automations(
    store: &MemoryStore,
    user_id: Uuid,
    limit: usize,
) -> Vec<AutomationRecord> {
    let automations = store.automations.read().await;
    let mut records: Vec<_> = automations
        .iter()
        .filter(|a| a.user_id == user_id)
        .cloned()
        .collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    records.truncate(limit);
    records
}

/// Number of the user's records created at or after `since`.
pub async fn count_automations_since(
    store: &MemoryStore,
    user_id: Uuid,
    since: DateTime<Utc>,
) -> u32 {
    let automations = store.automations.read().await;
    let count = automations
        .iter()
        .filter(|a| a.user_id == user_id && a.created_at >= since)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Duration;

    use super::*;

    pub(crate) fn sample(user_id: Uuid, n: usize) -> NewAutomation {
        NewAutomation {
            user_id,
            product_url: format!("https://www.amazon.in/dp/B0TEST{n:04}"),
            product_title: format!("Product {n}"),
            price: "₹999".to_string(),
            rating: "4.2/5".to_string(),
            whatsapp_message: "wa".to_string(),
            telegram_message: "tg".to_string(),
            affiliate_tag: "deals-21".to_string(),
            spreadsheet_id: None,
        }
    }

    #[tokio::test]
    async fn ids_are_monotonic_from_one() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let a = create_automation(&store, sample(user, 1)).await;
        let b = create_automation(&store, sample(user, 2)).await;
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn list_returns_latest_first_for_one_user() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let now = Utc::now();

        for n in 0..5 {
            let at = now - Duration::minutes(10 - i64::try_from(n).unwrap());
            insert_automation_at(&store, sample(user, n), at).await;
        }
        create_automation(&store, sample(other, 99)).await;

        let listed = list_automations(&store, user, 3).await;
        let titles: Vec<_> = listed.iter().map(|a| a.product_title.as_str()).collect();
        assert_eq!(titles, vec!["Product 4", "Product 3", "Product 2"]);
    }

    #[tokio::test]
    async fn count_since_is_inclusive_and_per_user() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let since = Utc::now() - Duration::hours(1);

        insert_automation_at(&store, sample(user, 1), since - Duration::seconds(1)).await;
        insert_automation_at(&store, sample(user, 2), since).await;
        insert_automation_at(&store, sample(user, 3), since + Duration::minutes(5)).await;
        insert_automation_at(&store, sample(Uuid::new_v4(), 4), since).await;

        assert_eq!(count_automations_since(&store, user, since).await, 2);
    }

    #[tokio::test]
    async fn records_serialize_camel_case() {
        let store = MemoryStore::new();
        let record = create_automation(&store, sample(Uuid::new_v4(), 1)).await;
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["productTitle"], "Product 1");
        assert_eq!(json["affiliateTag"], "deals-21");
        assert!(json["spreadsheetId"].is_null());
    }
}
