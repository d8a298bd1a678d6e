//! Upstream error definitions.

use thiserror::Error;

/// Errors that can occur while talking to Discord.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// The bot token is empty or cannot be sent as a header.
    #[error("Invalid bot token: {0}")]
    InvalidToken(&'static str),

    /// The configured API base cannot carry path segments.
    #[error("Invalid API base URL: {0}")]
    BaseUrl(String),

    /// Transport-level failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Discord answered with a non-success status.
    #[error("Discord API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A call was made before `open` succeeded.
    #[error("Session is not open")]
    NotOpen,

    /// A call was made after `close`.
    #[error("Session is closed")]
    Closed,
}

/// Result type for upstream operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
