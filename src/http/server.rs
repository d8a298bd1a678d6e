//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with both mutation routes and the 404 fallback
//! - Gate the two mutation routes with the API key middleware; the 404
//!   fallback answers without a key check
//! - Stamp `X-Powered-By` on every response
//! - Wire up request IDs, tracing and panic recovery
//! - Serve on a listener until shutdown

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::discord::{RestSessionFactory, SessionFactory};
use crate::http::handlers::{add_role, not_found, remove_role, AppState};
use crate::http::middleware::{require_api_key, AuthState};
use crate::http::response::{ApiResponse, MSG_INTERNAL};
use crate::lifecycle::ShutdownSignal;

pub const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// HTTP server for the role gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl GatewayServer {
    /// Create a server that talks to Discord over REST.
    pub fn new(config: GatewayConfig) -> Self {
        let sessions = Arc::new(RestSessionFactory::new(
            config.discord.clone(),
            &config.timeouts,
        ));
        Self::with_sessions(config, sessions)
    }

    /// Create a server with a custom upstream.
    pub fn with_sessions(config: GatewayConfig, sessions: Arc<dyn SessionFactory>) -> Self {
        let router = build_router(&config, sessions);
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &GatewayConfig, sessions: Arc<dyn SessionFactory>) -> Router {
    let state = AppState {
        sessions,
        guild_id: Arc::from(config.discord.guild_id.as_str()),
    };
    let auth = AuthState::new(config.auth.api_secret.as_str());

    // Validation guarantees this parses; fall back rather than panic.
    let powered_by = HeaderValue::from_str(&config.auth.powered_by)
        .unwrap_or_else(|_| HeaderValue::from_static("role-gateway"));

    Router::new()
        .route("/api/role/add/{user_id}/{role_id}", any(add_role))
        .route("/api/role/remove/{user_id}/{role_id}", any(remove_role))
        .route_layer(middleware::from_fn_with_state(auth, require_api_key))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(SetResponseHeaderLayer::overriding(X_POWERED_BY, powered_by))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!(panic = %detail, "Handler panicked");
    ApiResponse::internal(MSG_INTERNAL).into_response()
}
