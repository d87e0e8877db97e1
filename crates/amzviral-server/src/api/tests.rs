use std::sync::{Arc, Mutex};
use std::time::Duration;

use amzviral_core::{AppConfig, Environment, ProductRecord, QuotaWindow};
use amzviral_db::{MemoryStore, NewAutomation, NewUser, QuotaPolicy};
use amzviral_scraper::{Discovery, ProductSource, ScraperError, SearchSource};
use amzviral_sheets::{SheetRow, SheetsError, SheetsExporter};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use super::{build_app, ApiError, AppState};
use crate::mail::Mailer;
use crate::middleware::{default_user_rate_limit, UserRateLimitState};

// ---------------------------------------------------------------------------
// Stub collaborators
// ---------------------------------------------------------------------------

fn listing(i: usize) -> ProductRecord {
    ProductRecord {
        title: format!("Wireless Earbuds Model {i} with ENC"),
        price: "₹1,299".to_string(),
        original_price: "₹2,999".to_string(),
        discount: Some("57% OFF".to_string()),
        rating: 4.2,
        review_count: 1_200,
        image_url: None,
        features: vec!["Bluetooth 5.3 with low latency".to_string()],
        canonical_url: format!("https://www.amazon.in/dp/B0TEST{i:04}"),
        source_id: format!("B0TEST{i:04}"),
    }
}

/// Returns `available` synthetic listings, capped at the requested limit.
struct ListingSource {
    available: usize,
}

#[async_trait]
impl SearchSource for ListingSource {
    async fn search_products(
        &self,
        _query: &str,
        limit: usize,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        Ok((0..self.available.min(limit)).map(listing).collect())
    }
}

struct FailingSource;

#[async_trait]
impl SearchSource for FailingSource {
    async fn search_products(
        &self,
        _query: &str,
        _limit: usize,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        Err(ScraperError::Validation("upstream offline".to_string()))
    }
}

/// Resolves any `/dp/` URL to the same listing.
struct FixedProduct;

#[async_trait]
impl ProductSource for FixedProduct {
    async fn scrape_product(&self, url: &str) -> Result<ProductRecord, ScraperError> {
        if url.contains("/dp/") {
            Ok(listing(7))
        } else {
            Err(ScraperError::InvalidProductUrl {
                url: url.to_string(),
            })
        }
    }
}

#[derive(Default)]
struct RecordingSheets {
    fail: bool,
    rows: Mutex<Vec<(String, SheetRow)>>,
}

#[async_trait]
impl SheetsExporter for RecordingSheets {
    async fn append_row(&self, spreadsheet_id: &str, row: &SheetRow) -> Result<(), SheetsError> {
        if self.fail {
            return Err(SheetsError::UnexpectedStatus {
                status: 403,
                body: "PERMISSION_DENIED".to_string(),
            });
        }
        self.rows
            .lock()
            .unwrap()
            .push((spreadsheet_id.to_string(), row.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingMailer {
    delivers: bool,
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_reset_code(&self, to: &str, code: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        self.delivers
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "debug".to_string(),
        amazon_base_url: "https://www.amazon.in".to_string(),
        scraper_timeout_secs: 20,
        scraper_max_redirects: 5,
        scraper_max_attempts: 3,
        scraper_attempt_delay_ms: 0,
        scraper_backoff_delay_ms: 0,
        discovery_category_pause_ms: 0,
        quota_limit: 50,
        quota_window: QuotaWindow::Daily,
        owner_emails: vec!["owner@example.com".to_string()],
        owner_usernames: vec!["boss".to_string()],
        require_payment: true,
        sheets_access_token: None,
        sheets_api_base: "https://sheets.googleapis.com".to_string(),
        payment_key_id: "rzp_test_key".to_string(),
    }
}

struct Harness {
    app: Router,
    store: Arc<MemoryStore>,
    sheets: Arc<RecordingSheets>,
    mailer: Arc<RecordingMailer>,
}

struct Options {
    search: Arc<dyn SearchSource>,
    sheets_fail: bool,
    mail_delivers: bool,
    rate_limit: UserRateLimitState,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            search: Arc::new(ListingSource { available: 10 }),
            sheets_fail: false,
            mail_delivers: false,
            rate_limit: default_user_rate_limit(),
        }
    }
}

fn harness_with(options: Options) -> Harness {
    let config = Arc::new(test_config());
    let store = Arc::new(MemoryStore::new());
    let sheets = Arc::new(RecordingSheets {
        fail: options.sheets_fail,
        ..RecordingSheets::default()
    });
    let mailer = Arc::new(RecordingMailer {
        delivers: options.mail_delivers,
        ..RecordingMailer::default()
    });
    let discovery = Discovery::new(options.search, Duration::ZERO).with_seed(7);

    let state = AppState::new(
        Arc::clone(&store),
        Arc::clone(&config),
        Arc::new(discovery),
        Arc::new(FixedProduct),
        Some(sheets.clone() as Arc<dyn SheetsExporter>),
        mailer.clone(),
        QuotaPolicy::from_config(&config),
    );

    Harness {
        app: build_app(state, options.rate_limit),
        store,
        sheets,
        mailer,
    }
}

fn harness() -> Harness {
    harness_with(Options::default())
}

impl Harness {
    async fn user(&self, username: &str, email: Option<&str>) -> Uuid {
        amzviral_db::create_user(
            &self.store,
            NewUser {
                username: username.to_string(),
                email: email.map(ToOwned::to_owned),
            },
        )
        .await
        .expect("create user")
        .id
    }

    async fn paid_user(&self, username: &str) -> Uuid {
        let id = self.user(username, None).await;
        amzviral_db::mark_user_paid(&self.store, id, Utc::now(), 30)
            .await
            .expect("mark paid");
        id
    }

    async fn seed_automations(&self, user_id: Uuid, n: usize) {
        for i in 0..n {
            amzviral_db::create_automation(
                &self.store,
                NewAutomation {
                    user_id,
                    product_url: format!("https://www.amazon.in/dp/B0SEED{i:04}"),
                    product_title: format!("Seeded {i}"),
                    price: "₹499".to_string(),
                    rating: "4/5".to_string(),
                    whatsapp_message: String::new(),
                    telegram_message: String::new(),
                    affiliate_tag: "seed-21".to_string(),
                    spreadsheet_id: None,
                },
            )
            .await;
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json parse")
        };
        (status, json)
    }
}

fn get(uri: &str, user: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(id) = user {
        builder = builder.header("x-user-id", id.to_string());
    }
    builder.body(Body::empty()).expect("request")
}

fn post(uri: &str, user: Option<Uuid>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(id) = user {
        builder = builder.header("x-user-id", id.to_string());
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[test]
fn api_error_codes_map_to_statuses() {
    for (code, status) in [
        ("unauthorized", StatusCode::UNAUTHORIZED),
        ("validation_error", StatusCode::BAD_REQUEST),
        ("payment_required", StatusCode::PAYMENT_REQUIRED),
        ("not_found", StatusCode::NOT_FOUND),
        ("conflict", StatusCode::CONFLICT),
        ("quota_exceeded", StatusCode::TOO_MANY_REQUESTS),
        ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let response = ApiError::new("req-1", code, "boom").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[test]
fn api_error_omits_remaining_unless_set() {
    let plain = serde_json::to_value(ApiError::new("req-1", "not_found", "missing")).unwrap();
    assert_eq!(plain["success"], false);
    assert_eq!(plain["requestId"], "req-1");
    assert!(plain.get("remaining").is_none());

    let quota = serde_json::to_value(
        ApiError::new("req-2", "quota_exceeded", "full").with_remaining(0),
    )
    .unwrap();
    assert_eq!(quota["remaining"], 0);
}

// ---------------------------------------------------------------------------
// Public routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_echoes_request_id() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-request-id", "trace-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-abc")
    );
}

#[tokio::test]
async fn categories_lists_all_seven() {
    let h = harness();
    let (status, json) = h.send(get("/api/categories", None)).await;

    assert_eq!(status, StatusCode::OK);
    let categories = json["categories"].as_array().expect("categories array");
    assert_eq!(categories.len(), 7);
    assert_eq!(categories[0]["id"], "electronics");
}

#[tokio::test]
async fn create_user_then_duplicate_conflicts() {
    let h = harness();
    let body = json!({ "username": "dealhunter", "email": "hunter@example.com" });

    let (status, json) = h.send(post("/api/users", None, &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(Uuid::parse_str(json["userId"].as_str().unwrap()).is_ok());

    let (status, json) = h.send(post("/api/users", None, &body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "conflict");
}

#[tokio::test]
async fn forgot_password_returns_code_when_mail_is_unavailable() {
    let h = harness();
    h.user("resetme", Some("reset@example.com")).await;

    let (status, json) = h
        .send(post(
            "/api/auth/forgot-password",
            None,
            &json!({ "email": "Reset@Example.com" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let code = json["resetCode"].as_str().expect("reset code in response");
    assert_eq!(code.len(), 24);
    assert!(json["note"].is_string());
    assert_eq!(h.mailer.sent.lock().unwrap()[0].1, code);
}

#[tokio::test]
async fn forgot_password_hides_code_when_mailed() {
    let h = harness_with(Options {
        mail_delivers: true,
        ..Options::default()
    });
    h.user("resetme", Some("reset@example.com")).await;

    let (status, json) = h
        .send(post(
            "/api/auth/forgot-password",
            None,
            &json!({ "email": "reset@example.com" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("resetCode").is_none());
    assert_eq!(h.mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn forgot_password_rejects_unknown_email() {
    let h = harness();
    let (status, json) = h
        .send(post(
            "/api/auth/forgot-password",
            None,
            &json!({ "email": "nobody@example.com" }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "validation_error");
}

// ---------------------------------------------------------------------------
// Authentication and throttling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_user_header_is_unauthorized() {
    let h = harness();
    let (status, json) = h.send(get("/api/user/status", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "unauthorized");
    assert!(json["requestId"].is_string());
}

#[tokio::test]
async fn unknown_user_id_is_unauthorized() {
    let h = harness();
    let (status, _) = h
        .send(get("/api/user/status", Some(Uuid::new_v4())))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn per_user_throttle_rejects_after_limit() {
    let h = harness_with(Options {
        rate_limit: UserRateLimitState::new(1, Duration::from_secs(60)),
        ..Options::default()
    });
    let user = h.user("chatty", None).await;

    let (first, _) = h.send(get("/api/user/status", Some(user))).await;
    let (second, json) = h.send(get("/api/user/status", Some(user))).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "rate_limited");
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn discover_requires_payment_for_unpaid_user() {
    let h = harness();
    let user = h.user("freeloader", None).await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "electronics", "affiliateTag": "deals-21", "limit": 1 }),
        ))
        .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "payment_required");
}

#[tokio::test]
async fn discover_processes_each_product() {
    let h = harness();
    let user = h.paid_user("seller").await;
    amzviral_db::set_spreadsheet_id(&h.store, user, "sheet-123")
        .await
        .unwrap();

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "electronics", "affiliateTag": "deals-21", "limit": 3 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 3);
    assert_eq!(json["dailyCount"], 3);
    assert_eq!(json["remaining"], 47);
    assert_eq!(json["dailyLimit"], 50);
    assert_eq!(json["spreadsheetId"], "sheet-123");
    assert_eq!(
        json["spreadsheetUrl"],
        "https://docs.google.com/spreadsheets/d/sheet-123"
    );

    let first = &json["results"][0];
    assert_eq!(first["product"]["category"], "electronics");
    assert!(first["whatsappMessage"]
        .as_str()
        .unwrap()
        .contains("https://www.amazon.in/dp/B0TEST0000?tag=deals-21"));
    assert!(first["telegramMessage"].as_str().unwrap().contains("deals-21"));
    assert!(first["automationId"].as_u64().is_some());

    let rows = h.sheets.rows.lock().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].0, "sheet-123");
    assert_eq!(rows[0].1.rating, "4.2/5 (1200 reviews)");
    assert_eq!(
        rows[0].1.product_url,
        "https://www.amazon.in/dp/B0TEST0000?tag=deals-21"
    );
    drop(rows);

    let records = amzviral_db::list_automations(&h.store, user, 50).await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].rating, "4.2/5");
    assert_eq!(records[0].spreadsheet_id.as_deref(), Some("sheet-123"));
}

#[tokio::test]
async fn discover_substitutes_fallback_when_search_fails() {
    let h = harness_with(Options {
        search: Arc::new(FailingSource),
        ..Options::default()
    });
    let user = h.paid_user("seller").await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "mobile", "affiliateTag": "deals-21", "limit": 5 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["product"]["category"], "mobile");
    assert!(json["spreadsheetId"].is_null());
}

#[tokio::test]
async fn discover_defaults_limit_to_five() {
    let h = harness();
    let user = h.paid_user("seller").await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "kitchen", "affiliateTag": "deals-21" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 5);
}

#[tokio::test]
async fn discover_hot_deals_tags_results() {
    let h = harness();
    let user = h.paid_user("seller").await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "hot", "affiliateTag": "deals-21", "limit": 2 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["product"]["category"], "deals");
}

#[tokio::test]
async fn discover_rejects_bad_input() {
    let h = harness();
    let user = h.paid_user("seller").await;

    for body in [
        json!({ "category": "garden", "affiliateTag": "deals-21", "limit": 1 }),
        json!({ "category": "electronics", "affiliateTag": "   ", "limit": 1 }),
        json!({ "category": "electronics", "affiliateTag": "deals-21", "limit": 0 }),
        json!({ "category": "electronics", "affiliateTag": "deals-21", "limit": -3 }),
        json!({ "category": "electronics", "affiliateTag": "deals-21", "limit": 101 }),
        json!({ "affiliateTag": "deals-21" }),
    ] {
        let (status, json) = h.send(post("/api/discover", Some(user), &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["code"], "validation_error");
    }
    assert!(amzviral_db::list_automations(&h.store, user, 50)
        .await
        .is_empty());
}

#[tokio::test]
async fn discover_over_quota_reports_remaining() {
    let h = harness();
    let user = h.paid_user("seller").await;
    h.seed_automations(user, 49).await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "fashion", "affiliateTag": "deals-21", "limit": 2 }),
        ))
        .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "quota_exceeded");
    assert_eq!(json["remaining"], 1);
    assert_eq!(
        amzviral_db::list_automations(&h.store, user, 100).await.len(),
        49
    );
}

#[tokio::test]
async fn owner_bypasses_payment_and_quota() {
    let h = harness();
    let owner = h.user("Boss", None).await;
    h.seed_automations(owner, 50).await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(owner),
            &json!({ "category": "beauty", "affiliateTag": "deals-21", "limit": 2 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["dailyCount"], 52);
    assert_eq!(json["remaining"], -2);
}

#[tokio::test]
async fn owner_limit_is_still_capped() {
    let h = harness();
    let owner = h.user("boss", None).await;

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(owner),
            &json!({ "category": "all", "affiliateTag": "deals-21", "limit": 4_294_967_295_u64 }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {json}");
    assert_eq!(json["code"], "validation_error");
    assert!(amzviral_db::list_automations(&h.store, owner, 50)
        .await
        .is_empty());
}

#[tokio::test]
async fn sheet_failures_do_not_fail_discovery() {
    let h = harness_with(Options {
        sheets_fail: true,
        ..Options::default()
    });
    let user = h.paid_user("seller").await;
    amzviral_db::set_spreadsheet_id(&h.store, user, "locked-sheet")
        .await
        .unwrap();

    let (status, json) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "fitness", "affiliateTag": "deals-21", "limit": 2 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(amzviral_db::list_automations(&h.store, user, 50).await.len(), 2);
}

// ---------------------------------------------------------------------------
// Single-product automation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn automate_records_product_and_uses_override_sheet() {
    let h = harness();
    let user = h.paid_user("seller").await;
    let url = "https://www.amazon.in/Some-Product/dp/B0TEST0007/ref=sr_1_1";

    let (status, json) = h
        .send(post(
            "/api/automate",
            Some(user),
            &json!({ "url": url, "affiliateTag": "deals-21", "spreadsheetId": "override-sheet" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["automation"]["productUrl"], url);
    assert_eq!(json["automation"]["affiliateTag"], "deals-21");
    assert_eq!(json["spreadsheetId"], "override-sheet");
    assert_eq!(h.sheets.rows.lock().unwrap()[0].0, "override-sheet");
}

#[tokio::test]
async fn automate_rejects_non_product_url() {
    let h = harness();
    let user = h.paid_user("seller").await;

    let (status, json) = h
        .send(post(
            "/api/automate",
            Some(user),
            &json!({ "url": "https://example.com/nothing", "affiliateTag": "deals-21" }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "validation_error");
}

// ---------------------------------------------------------------------------
// Account endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sheets_id_round_trip() {
    let h = harness();
    let user = h.user("seller", None).await;

    let (_, json) = h.send(get("/api/sheets/status", Some(user))).await;
    assert_eq!(json["connected"], false);
    let (_, json) = h.send(get("/api/user/sheets-id", Some(user))).await;
    assert_eq!(json["sheetsId"], "");

    let (status, json) = h
        .send(post(
            "/api/user/sheets-id",
            Some(user),
            &json!({ "sheetsId": "1AbC_d-9" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sheetsId"], "1AbC_d-9");

    let (_, json) = h.send(get("/api/user/sheets-id", Some(user))).await;
    assert_eq!(json["sheetsId"], "1AbC_d-9");
    let (_, json) = h.send(get("/api/sheets/status", Some(user))).await;
    assert_eq!(json["connected"], true);
}

#[tokio::test]
async fn sheets_id_is_required() {
    let h = harness();
    let user = h.user("seller", None).await;

    let (status, json) = h
        .send(post("/api/user/sheets-id", Some(user), &json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "sheetsId is required");
}

#[tokio::test]
async fn payment_verify_unlocks_discovery() {
    let h = harness();
    let user = h.user("newcomer", None).await;

    let (status, json) = h
        .send(post(
            "/api/payment/create-order",
            Some(user),
            &json!({ "amount": 129_900 }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["orderId"].as_str().unwrap().starts_with("order_"));
    assert_eq!(json["keyId"], "rzp_test_key");
    assert_eq!(json["amount"], 129_900);

    let (status, json) = h
        .send(post("/api/payment/verify", Some(user), &json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Subscription activated for 30 days");
    assert!(json["subscriptionEndsAt"].is_string());

    let (status, _) = h
        .send(post(
            "/api/discover",
            Some(user),
            &json!({ "category": "home", "affiliateTag": "deals-21", "limit": 1 }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn automations_listing_includes_quota_status() {
    let h = harness();
    let user = h.paid_user("seller").await;
    h.seed_automations(user, 4).await;

    let (status, json) = h.send(get("/api/automations", Some(user))).await;

    assert_eq!(status, StatusCode::OK);
    let automations = json["automations"].as_array().expect("automations array");
    assert_eq!(automations.len(), 4);
    assert_eq!(automations[0]["productTitle"], "Seeded 3");
    assert_eq!(json["dailyCount"], 4);
    assert_eq!(json["remaining"], 46);
    assert_eq!(json["isPaid"], true);
    assert_eq!(json["isOwner"], false);
}

#[tokio::test]
async fn user_status_flags_owner_by_email() {
    let h = harness();
    let user = h.user("someone", Some("Owner@Example.com")).await;

    let (status, json) = h.send(get("/api/user/status", Some(user))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isOwner"], true);
    assert_eq!(json["isPaid"], false);
    assert_eq!(json["dailyLimit"], 50);
}
