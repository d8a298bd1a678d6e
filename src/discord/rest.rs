//! Discord REST session over reqwest.
//!
//! # Responsibilities
//! - Build a dedicated HTTP client per session (no pooling across requests)
//! - Verify the bot credential when the session is opened
//! - Issue guild member role mutations
//! - Bound every call with the configured timeouts

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response};
use std::time::Duration;
use url::Url;

use crate::config::{DiscordConfig, TimeoutConfig};
use crate::discord::session::{Session, SessionFactory};
use crate::discord::types::{DiscordError, DiscordResult};

const USER_AGENT: &str = concat!("DiscordBot (role-gateway, ", env!("CARGO_PKG_VERSION"), ")");

/// Creates [`RestSession`]s from the process configuration.
#[derive(Debug, Clone)]
pub struct RestSessionFactory {
    discord: DiscordConfig,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl RestSessionFactory {
    pub fn new(discord: DiscordConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            discord,
            connect_timeout: Duration::from_secs(timeouts.connect_secs),
            request_timeout: Duration::from_secs(timeouts.request_secs),
        }
    }
}

impl SessionFactory for RestSessionFactory {
    fn create(&self) -> DiscordResult<Box<dyn Session>> {
        let token = self.discord.bot_token.trim();
        if token.is_empty() {
            return Err(DiscordError::InvalidToken("empty"));
        }

        let mut auth = HeaderValue::from_str(&format!("Bot {}", token))
            .map_err(|_| DiscordError::InvalidToken("contains characters not allowed in a header"))?;
        auth.set_sensitive(true);

        let api_base = Url::parse(&self.discord.api_base)
            .map_err(|e| DiscordError::BaseUrl(format!("{}: {}", self.discord.api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(DiscordError::BaseUrl(self.discord.api_base.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Box::new(RestSession {
            client: Some(client),
            api_base,
            opened: false,
        }))
    }
}

/// A request-scoped Discord session.
pub struct RestSession {
    client: Option<reqwest::Client>,
    api_base: Url,
    opened: bool,
}

impl RestSession {
    /// Join `segments` onto the API base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> DiscordResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| DiscordError::BaseUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn client(&self) -> DiscordResult<&reqwest::Client> {
        self.client.as_ref().ok_or(DiscordError::Closed)
    }

    async fn send(&self, method: Method, url: Url) -> DiscordResult<Response> {
        let response = self.client()?.request(method.clone(), url.clone()).send().await?;
        let status = response.status();

        tracing::debug!(method = %method, path = %url.path(), status = %status, "Discord API call");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DiscordError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn member_role(
        &mut self,
        method: Method,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> DiscordResult<()> {
        if self.client.is_none() {
            return Err(DiscordError::Closed);
        }
        if !self.opened {
            return Err(DiscordError::NotOpen);
        }

        let url = self.endpoint(&["guilds", guild_id, "members", user_id, "roles", role_id])?;
        self.send(method, url).await?;
        Ok(())
    }
}

#[async_trait]
impl Session for RestSession {
    async fn open(&mut self) -> DiscordResult<()> {
        let url = self.endpoint(&["users", "@me"])?;
        self.send(Method::GET, url).await?;
        self.opened = true;
        Ok(())
    }

    async fn add_role(&mut self, guild_id: &str, user_id: &str, role_id: &str) -> DiscordResult<()> {
        self.member_role(Method::PUT, guild_id, user_id, role_id).await
    }

    async fn remove_role(
        &mut self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> DiscordResult<()> {
        self.member_role(Method::DELETE, guild_id, user_id, role_id).await
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            self.opened = false;
            tracing::trace!("Discord session closed");
        }
    }
}
