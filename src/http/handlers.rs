//! Role mutation handlers.
//!
//! Each request runs the same pipeline:
//!
//! ```text
//! create session → open → one mutation → close (always) → envelope
//! ```
//!
//! Any failure skips the remaining steps. Upstream error detail is logged
//! here and never copied into the response body.

use axum::{
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
};
use percent_encoding::percent_decode_str;
use std::sync::Arc;

use crate::discord::{SessionFactory, SessionGuard};
use crate::http::response::{ApiResponse, MSG_SESSION_CREATE, MSG_SESSION_OPEN};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionFactory>,
    pub guild_id: Arc<str>,
}

/// Which way the membership changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Add,
    Remove,
}

impl RoleAction {
    pub fn success_message(self) -> &'static str {
        match self {
            RoleAction::Add => "Role added successfully",
            RoleAction::Remove => "Role removed successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            RoleAction::Add => "Error adding role to user",
            RoleAction::Remove => "Error removing role from user",
        }
    }
}

/// One requested change, taken from the path.
#[derive(Debug, Clone)]
pub struct RoleMutation {
    pub action: RoleAction,
    pub user_id: String,
    pub role_id: String,
}

/// `{user_id}/{role_id}` taken from the path as opaque strings.
///
/// Segments that do not decode to UTF-8 are decoded lossily and passed on;
/// the upstream decides whether they are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePath {
    pub user_id: String,
    pub role_id: String,
}

impl<S> FromRequestParts<S> for RolePath
where
    S: Send + Sync,
{
    type Rejection = ApiResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<(String, String)>::from_request_parts(parts, state).await {
            Ok(Path((user_id, role_id))) => Ok(Self { user_id, role_id }),
            Err(rejection) => {
                // Both routes end in the two parameters.
                let mut segments = parts.uri.path().rsplit('/');
                match (segments.next(), segments.next()) {
                    (Some(role), Some(user)) if !role.is_empty() && !user.is_empty() => {
                        tracing::debug!(%rejection, "Decoding path parameters lossily");
                        Ok(Self {
                            user_id: decode_lossy(user),
                            role_id: decode_lossy(role),
                        })
                    }
                    _ => {
                        tracing::warn!(%rejection, "Unusable path parameters");
                        Err(ApiResponse::not_found())
                    }
                }
            }
        }
    }
}

fn decode_lossy(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

pub async fn add_role(State(state): State<AppState>, path: RolePath) -> ApiResponse {
    let mutation = RoleMutation {
        action: RoleAction::Add,
        user_id: path.user_id,
        role_id: path.role_id,
    };
    mutate(&state, &mutation).await
}

pub async fn remove_role(State(state): State<AppState>, path: RolePath) -> ApiResponse {
    let mutation = RoleMutation {
        action: RoleAction::Remove,
        user_id: path.user_id,
        role_id: path.role_id,
    };
    mutate(&state, &mutation).await
}

pub async fn not_found() -> ApiResponse {
    ApiResponse::not_found()
}

/// Run a single mutation against a fresh upstream session.
pub async fn mutate(state: &AppState, mutation: &RoleMutation) -> ApiResponse {
    let session = match state.sessions.create() {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Error creating Discord session");
            return ApiResponse::internal(MSG_SESSION_CREATE);
        }
    };
    let mut session = SessionGuard::new(session);

    if let Err(e) = session.open().await {
        tracing::error!(error = %e, "Error opening connection to Discord");
        return ApiResponse::internal(MSG_SESSION_OPEN);
    }

    let guild_id = &*state.guild_id;
    let result = match mutation.action {
        RoleAction::Add => {
            session
                .add_role(guild_id, &mutation.user_id, &mutation.role_id)
                .await
        }
        RoleAction::Remove => {
            session
                .remove_role(guild_id, &mutation.user_id, &mutation.role_id)
                .await
        }
    };

    if let Err(e) = result {
        tracing::error!(
            error = %e,
            user_id = %mutation.user_id,
            role_id = %mutation.role_id,
            "{}",
            mutation.action.failure_message()
        );
        return ApiResponse::internal(mutation.action.failure_message());
    }

    tracing::info!(
        action = ?mutation.action,
        role_id = %mutation.role_id,
        user_id = %mutation.user_id,
        "{}",
        mutation.action.success_message()
    );
    ApiResponse::ok(mutation.action.success_message())
}
