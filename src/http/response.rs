//! JSON response envelope.
//!
//! Every body the gateway writes is an [`Envelope`]: success, client error,
//! server error and not-found alike. `error` is true exactly when the status
//! is not 2xx.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const MSG_UNAUTHORIZED: &str = "Unauthorized access, invalid API key!";
pub const MSG_NOT_FOUND: &str = "404 Not Found";
pub const MSG_SESSION_CREATE: &str = "Error creating Discord session";
pub const MSG_SESSION_OPEN: &str = "Error opening connection to Discord";
pub const MSG_INTERNAL: &str = "Internal Server Error";

/// Uniform `{message, error}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub message: String,
    pub error: bool,
}

/// An envelope paired with the status it is sent with.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    envelope: Envelope,
}

impl ApiResponse {
    /// 200 with `error: false`.
    pub fn ok(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope {
                message: message.to_string(),
                error: false,
            },
        }
    }

    /// A non-2xx status with `error: true`.
    pub fn failure(status: StatusCode, message: &str) -> Self {
        debug_assert!(!status.is_success(), "failure envelope with status {}", status);
        Self {
            status,
            envelope: Envelope {
                message: message.to_string(),
                error: true,
            },
        }
    }

    pub fn unauthorized() -> Self {
        Self::failure(StatusCode::UNAUTHORIZED, MSG_UNAUTHORIZED)
    }

    pub fn not_found() -> Self {
        Self::failure(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
    }

    pub fn internal(message: &str) -> Self {
        Self::failure(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
