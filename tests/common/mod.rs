//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use role_gateway::discord::{DiscordError, DiscordResult, Session, SessionFactory};
use role_gateway::{GatewayConfig, GatewayServer, Shutdown};

pub const SECRET: &str = "test-secret";
pub const GUILD: &str = "guild-1";

/// Gateway config pointing at `api_base`, with the test secret and guild.
pub fn gateway_config(api_base: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.auth.api_secret = SECRET.into();
    config.auth.powered_by = "@role-gateway-test".into();
    config.discord.bot_token = "bot-token".into();
    config.discord.guild_id = GUILD.into();
    config.discord.api_base = api_base.into();
    config
}

/// Start a gateway on an ephemeral port.
pub async fn start_gateway(server: GatewayServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let signal = shutdown.signal();

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

/// Which step of the upstream lifecycle should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailAt {
    #[default]
    Nowhere,
    Create,
    Open,
    Mutation,
}

/// In-process upstream that records the lifecycle of every session.
#[derive(Default)]
pub struct FakeDiscord {
    pub fail_at: FailAt,
    pub mutation_delay: Option<Duration>,
    pub created: AtomicUsize,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
    pub mutations: Arc<Mutex<Vec<String>>>,
}

impl FakeDiscord {
    pub fn failing_at(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            ..Default::default()
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }
}

struct FakeSession {
    fail_at: FailAt,
    delay: Option<Duration>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    mutations: Arc<Mutex<Vec<String>>>,
}

impl FakeSession {
    async fn mutate(&mut self, entry: String) -> DiscordResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.mutations.lock().unwrap().push(entry);
        if self.fail_at == FailAt::Mutation {
            return Err(DiscordError::Api {
                status: 403,
                body: r#"{"message": "Missing Permissions", "code": 50013}"#.into(),
            });
        }
        Ok(())
    }
}

impl SessionFactory for FakeDiscord {
    fn create(&self) -> DiscordResult<Box<dyn Session>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == FailAt::Create {
            return Err(DiscordError::InvalidToken("empty"));
        }
        Ok(Box::new(FakeSession {
            fail_at: self.fail_at,
            delay: self.mutation_delay,
            opened: self.opened.clone(),
            closed: self.closed.clone(),
            mutations: self.mutations.clone(),
        }))
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn open(&mut self) -> DiscordResult<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == FailAt::Open {
            return Err(DiscordError::Api {
                status: 401,
                body: r#"{"message": "401: Unauthorized", "code": 0}"#.into(),
            });
        }
        Ok(())
    }

    async fn add_role(&mut self, guild_id: &str, user_id: &str, role_id: &str) -> DiscordResult<()> {
        self.mutate(format!("add {}/{}/{}", guild_id, user_id, role_id)).await
    }

    async fn remove_role(
        &mut self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> DiscordResult<()> {
        self.mutate(format!("remove {}/{}/{}", guild_id, user_id, role_id)).await
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// A call seen by the mock Discord API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

/// Programmable stand-in for Discord's REST API.
#[derive(Clone)]
pub struct MockDiscordApi {
    pub me_status: StatusCode,
    pub role_status: StatusCode,
    pub delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockDiscordApi {
    fn default() -> Self {
        Self {
            me_status: StatusCode::OK,
            role_status: StatusCode::NO_CONTENT,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockDiscordApi {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: Method, path: String, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path,
            authorization,
        });
    }

    /// Serve on an ephemeral port; returns the `api_base` to configure.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/api/v10/users/@me", get(me))
            .route(
                "/api/v10/guilds/{guild}/members/{user}/roles/{role}",
                put(member_role).delete(member_role),
            )
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{}/api/v10", addr)
    }
}

async fn me(State(api): State<MockDiscordApi>, headers: HeaderMap) -> (StatusCode, String) {
    api.record(Method::GET, "/users/@me".into(), &headers);
    if let Some(delay) = api.delay {
        tokio::time::sleep(delay).await;
    }
    if api.me_status.is_success() {
        (api.me_status, r#"{"id": "1", "username": "role-bot", "bot": true}"#.into())
    } else {
        (api.me_status, r#"{"message": "401: Unauthorized", "code": 0}"#.into())
    }
}

async fn member_role(
    State(api): State<MockDiscordApi>,
    method: Method,
    Path((guild, user, role)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    api.record(
        method,
        format!("/guilds/{}/members/{}/roles/{}", guild, user, role),
        &headers,
    );
    if api.role_status.is_success() {
        (api.role_status, String::new())
    } else {
        (
            api.role_status,
            r#"{"message": "Missing Permissions", "code": 50013}"#.into(),
        )
    }
}
