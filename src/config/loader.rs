//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay the environment
/// and validate the result.
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let _ = dotenvy::dotenv();

    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `API_SECRET`, `DISCORD_TOKEN` and `GUILD_ID` are taken even when empty.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret) = lookup("API_SECRET") {
        config.auth.api_secret = secret;
    }
    if let Some(token) = lookup("DISCORD_TOKEN") {
        config.discord.bot_token = token;
    }
    if let Some(guild) = lookup("GUILD_ID") {
        config.discord.guild_id = guild;
    }
    if let Some(addr) = lookup("BIND_ADDRESS").filter(|v| !v.is_empty()) {
        config.listener.bind_address = addr;
    }
    if let Some(base) = lookup("DISCORD_API_BASE").filter(|v| !v.is_empty()) {
        config.discord.api_base = base;
    }
    if let Some(format) = lookup("LOG_FORMAT") {
        config.observability.json = format.eq_ignore_ascii_case("json");
    }
}
