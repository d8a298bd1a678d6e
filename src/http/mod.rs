//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (request ID, tracing, X-Powered-By, panic recovery)
//!     → middleware/api_key.rs (X-API-Key gate, 401 on mismatch)
//!     → route match: add / remove / fallback 404
//!     → handlers.rs (upstream session lifecycle)
//!     → response.rs (JSON envelope)
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use handlers::{AppState, RoleAction, RoleMutation};
pub use response::{ApiResponse, Envelope};
pub use server::{build_router, GatewayServer, X_POWERED_BY, X_REQUEST_ID};
