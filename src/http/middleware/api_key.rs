//! Shared-secret authorization middleware.
//! Rejects any request whose `X-API-Key` does not match the configured secret.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use crate::http::response::ApiResponse;

pub const X_API_KEY: &str = "x-api-key";

/// State required for API key checks.
#[derive(Clone)]
pub struct AuthState {
    api_secret: Arc<str>,
}

impl AuthState {
    pub fn new(api_secret: impl Into<Arc<str>>) -> Self {
        Self {
            api_secret: api_secret.into(),
        }
    }

    /// A missing header compares as the empty string.
    fn accepts(&self, provided: &[u8]) -> bool {
        constant_time_eq(provided, self.api_secret.as_bytes())
    }
}

pub async fn require_api_key(
    State(auth): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(X_API_KEY)
        .map(|v| v.as_bytes())
        .unwrap_or_default();

    if !auth.accepts(provided) {
        tracing::warn!(
            api_key = %String::from_utf8_lossy(provided),
            path = %request.uri().path(),
            "Unauthorized access, invalid API key"
        );
        return ApiResponse::unauthorized().into_response();
    }

    next.run(request).await
}
