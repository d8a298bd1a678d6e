//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML) + .env + process environment
//!     → loader.rs (parse, overlay API_SECRET / DISCORD_TOKEN / GUILD_ID)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to middleware and handlers
//! ```
//!
//! # Design Decisions
//! - Read once at startup; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Secrets are redacted from `Debug` output

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, DiscordConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig,
};
pub use validation::{config_warnings, ValidationError};
