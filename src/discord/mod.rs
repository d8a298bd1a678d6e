//! Upstream Discord subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → SessionFactory::create (build client from bot token, no I/O)
//!     → SessionGuard (closes on drop)
//!     → Session::open (GET /users/@me)
//!     → Session::add_role / remove_role (PUT / DELETE member role)
//!     → guard dropped → Session::close
//! ```
//!
//! # Security Constraints
//! - Bot token only from configuration/environment
//! - Never log the token; the Authorization header is marked sensitive
//! - Every call is bounded by the configured timeouts

pub mod rest;
pub mod session;
pub mod types;

pub use rest::{RestSession, RestSessionFactory};
pub use session::{Session, SessionFactory, SessionGuard};
pub use types::{DiscordError, DiscordResult};
