//! Upstream session seam.
//!
//! Handlers only see these traits, so tests can script the upstream without
//! a network.

use async_trait::async_trait;
use std::ops::{Deref, DerefMut};

use crate::discord::types::DiscordResult;

/// Builds a fresh, unopened session for one request.
pub trait SessionFactory: Send + Sync {
    /// Construct a session. Performs no I/O.
    fn create(&self) -> DiscordResult<Box<dyn Session>>;
}

/// A live handle to the platform, private to a single request.
#[async_trait]
pub trait Session: Send {
    /// Connect and authenticate.
    async fn open(&mut self) -> DiscordResult<()>;

    /// Grant `role_id` to `user_id` in `guild_id`.
    async fn add_role(&mut self, guild_id: &str, user_id: &str, role_id: &str) -> DiscordResult<()>;

    /// Revoke `role_id` from `user_id` in `guild_id`.
    async fn remove_role(&mut self, guild_id: &str, user_id: &str, role_id: &str)
        -> DiscordResult<()>;

    /// Release the session. Must be idempotent.
    fn close(&mut self);
}

/// Owns a session and closes it when dropped.
///
/// Drop runs on every exit path, including early returns and unwinding.
pub struct SessionGuard {
    session: Box<dyn Session>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn Session>) -> Self {
        Self { session }
    }
}

impl Deref for SessionGuard {
    type Target = dyn Session;

    fn deref(&self) -> &Self::Target {
        &*self.session
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.session
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.session.close();
    }
}
