use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use amzviral_db::User;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::{ApiError, AppState};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The authenticated caller, resolved from `x-user-id` by [`require_user`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window request limiter keyed by user id.
#[derive(Debug, Clone)]
pub struct UserRateLimitState {
    max_requests: usize,
    window: Duration,
    windows: Arc<Mutex<HashMap<Uuid, RateLimitWindow>>>,
}

impl UserRateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Counts one request for `user_id`; `false` once the window is full.
    async fn admit(&self, user_id: Uuid) -> bool {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let window = windows.entry(user_id).or_insert(RateLimitWindow {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }
        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

pub fn default_user_rate_limit() -> UserRateLimitState {
    UserRateLimitState::new(120, Duration::from_secs(60))
}

fn request_id_of(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Resolves `x-user-id` to a registered user, or rejects with 401.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok());

    let user = match user_id {
        Some(id) => amzviral_db::get_user(&state.store, id).await,
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        None => {
            ApiError::new(request_id_of(&req), "unauthorized", "Unauthorized").into_response()
        }
    }
}

/// Per-user throttle; runs inside [`require_user`].
pub async fn enforce_user_rate_limit(
    State(limits): State<UserRateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(user_id) = req.extensions().get::<CurrentUser>().map(|u| u.0.id) else {
        return next.run(req).await;
    };

    if !limits.admit(user_id).await {
        tracing::warn!(%user_id, "request throttled");
        return ApiError::new(request_id_of(&req), "rate_limited", "rate limit exceeded")
            .into_response();
    }

    next.run(req).await
}
