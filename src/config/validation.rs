//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values. All problems are collected
//! rather than stopping at the first one.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("discord.api_base '{0}' is not a valid URL")]
    ApiBase(String),

    #[error("discord.guild_id must be set (GUILD_ID)")]
    MissingGuild,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("auth.powered_by '{0}' is not a valid header value")]
    PoweredBy(String),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if url::Url::parse(&config.discord.api_base).is_err() {
        errors.push(ValidationError::ApiBase(config.discord.api_base.clone()));
    }

    if config.discord.guild_id.trim().is_empty() {
        errors.push(ValidationError::MissingGuild);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if axum::http::HeaderValue::from_str(&config.auth.powered_by).is_err() {
        errors.push(ValidationError::PoweredBy(config.auth.powered_by.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Settings that are accepted but almost certainly unintended.
///
/// Empty credentials do not fail startup; they fail per request instead.
pub fn config_warnings(config: &GatewayConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if config.auth.api_secret.is_empty() {
        warnings.push("API_SECRET is empty; requests without X-API-Key will be accepted");
    }
    if config.discord.bot_token.trim().is_empty() {
        warnings.push("DISCORD_TOKEN is empty; every mutation will fail at session creation");
    }
    warnings
}
