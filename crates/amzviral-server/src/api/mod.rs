mod access;
mod account;
mod automate;
mod catalog;
mod discover;
mod payment;
mod pipeline;

use std::sync::{Arc, Mutex, PoisonError};

use amzviral_core::AppConfig;
use amzviral_db::{DbError, MemoryStore, QuotaPolicy};
use amzviral_scraper::{Discovery, ProductSource, ScraperError};
use amzviral_sheets::SheetsExporter;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::mail::Mailer;
use crate::middleware::{
    enforce_user_rate_limit, request_id, require_user, UserRateLimitState, USER_ID_HEADER,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub config: Arc<AppConfig>,
    pub discovery: Arc<Discovery>,
    pub products: Arc<dyn ProductSource>,
    /// `None` when spreadsheet export is not configured.
    pub sheets: Option<Arc<dyn SheetsExporter>>,
    pub mailer: Arc<dyn Mailer>,
    pub quota: QuotaPolicy,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(
        store: Arc<MemoryStore>,
        config: Arc<AppConfig>,
        discovery: Arc<Discovery>,
        products: Arc<dyn ProductSource>,
        sheets: Option<Arc<dyn SheetsExporter>>,
        mailer: Arc<dyn Mailer>,
        quota: QuotaPolicy,
    ) -> Self {
        Self {
            store,
            config,
            discovery,
            products,
            sheets,
            mailer,
            quota,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    /// Runs `f` with the shared generator used for message phrases and reset codes.
    pub(super) fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

/// Failure body shared by every endpoint and middleware.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    pub code: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    users: usize,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: message.into(),
            code: code.into(),
            request_id: request_id.into(),
            remaining: None,
        }
    }

    #[must_use]
    pub fn with_remaining(mut self, remaining: i64) -> Self {
        self.remaining = Some(remaining);
        self
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "payment_required" => StatusCode::PAYMENT_REQUIRED,
            "not_found" => StatusCode::NOT_FOUND,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" | "quota_exceeded" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Unwraps a JSON body, turning axum's rejection into a `validation_error`.
pub(super) fn json_body<T>(
    req_id: &str,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::new(req_id, "validation_error", rejection.body_text()))
}

pub(super) fn map_db_error(req_id: &str, error: &DbError) -> ApiError {
    match error {
        DbError::UserNotFound(_) => ApiError::new(req_id, "not_found", "User not found"),
        DbError::DuplicateUser { .. } => ApiError::new(req_id, "conflict", error.to_string()),
        DbError::QuotaExceeded { remaining, .. } => {
            ApiError::new(req_id, "quota_exceeded", error.to_string()).with_remaining(*remaining)
        }
    }
}

pub(super) fn map_scraper_error(req_id: &str, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::InvalidProductUrl { .. } | ScraperError::Validation(_) => {
            ApiError::new(req_id, "validation_error", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "product scrape failed");
            ApiError::new(req_id, "upstream_error", error.to_string())
        }
    }
}

pub(super) fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(state: AppState, rate_limit: UserRateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/discover", post(discover::discover))
        .route("/api/automate", post(automate::automate))
        .route("/api/automations", get(account::list_automations))
        .route("/api/user/status", get(account::user_status))
        .route(
            "/api/user/sheets-id",
            get(account::get_sheets_id).post(account::set_sheets_id),
        )
        .route("/api/sheets/status", get(account::sheets_status))
        .route("/api/payment/create-order", post(payment::create_order))
        .route("/api/payment/verify", post(payment::verify))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(state, require_user))
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_user_rate_limit,
                )),
        )
}

pub fn build_app(state: AppState, rate_limit: UserRateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/users", post(account::create_user))
        .route("/api/auth/forgot-password", post(account::forgot_password));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(state.clone(), rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        users: state.store.user_count().await,
    })
}

#[cfg(test)]
mod tests;
