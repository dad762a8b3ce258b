//! User and session store seams.
//!
//! Both stores are shared across concurrent requests, so implementations
//! must be `Send + Sync`. `Ok(None)` means "not there"; `Err` means the store
//! could not answer.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::session::Session;
use crate::user::{NewUser, User};

/// Persistent storage of local users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Look a user up by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// Provision a user.
    ///
    /// Must fail with [`StoreError::Conflict`] when the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Persistent storage of sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return a live session for `user` from `ip`, creating one if needed.
    ///
    /// `Ok(None)` means the store declined to issue a session.
    async fn create_if_absent(&self, user: &User, ip: &str)
    -> Result<Option<Session>, StoreError>;

    /// Look a session up by its token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, StoreError>;

    /// Remove the sessions `user_id` holds from `ip`.
    async fn sign_out(&self, user_id: i32, ip: &str) -> Result<(), StoreError>;
}
