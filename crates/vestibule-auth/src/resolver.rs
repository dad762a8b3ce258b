//! Resolve the caller behind a session token.

use std::sync::Arc;

use crate::error::Result;
use crate::store::{SessionStore, UserStore};
use crate::token::SessionTokenSource;
use crate::user::User;

/// Maps an inbound session token to the local user that owns it.
#[derive(Clone)]
pub struct SessionResolver {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
}

impl SessionResolver {
    /// Create a resolver over the given stores.
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// The user behind `request`'s session token.
    ///
    /// `Ok(None)` when there is no token, no such session, or the session's
    /// user no longer exists.
    pub async fn get_auth_user<R>(&self, request: &R) -> Result<Option<User>>
    where
        R: SessionTokenSource + ?Sized,
    {
        let Some(token) = request.session_token() else {
            return Ok(None);
        };

        let Some(session) = self.sessions.find_by_token(&token).await? else {
            log::debug!("No live session for presented token");
            return Ok(None);
        };

        let user = self.users.find_by_id(session.user_id).await?;
        if user.is_none() {
            log::warn!(
                "Session {} refers to missing user {}",
                session.id,
                session.user_id
            );
        }
        Ok(user)
    }
}
