//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware / handlers / upstream client
//!     → tracing events (request_id carried on the request span)
//!     → logging.rs subscriber (stdout, compact or JSON)
//! ```
//!
//! Upstream failure causes are logged here at error level; clients only
//! ever see the generic envelope message.

pub mod logging;

pub use logging::init_logging;
