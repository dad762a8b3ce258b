//! Directory-backed login.
//!
//! [`Authenticator`] checks credentials with a [`DirectoryService`], applies
//! the directory's not-exist policy, provisions a local user when allowed and
//! asks the [`SessionStore`] for a session.

use std::sync::Arc;

use crate::directory::DirectoryService;
use crate::error::{Result, StoreError};
use crate::outcome::{AuthOutcome, SessionPayload};
use crate::store::{SessionStore, UserStore};
use crate::user::{NewUser, User, UserState};

/// Orchestrates a login across the directory, user store and session store.
///
/// Holds no per-request state; one instance can serve concurrent logins.
#[derive(Clone)]
pub struct Authenticator {
    directory: Arc<dyn DirectoryService>,
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
}

impl Authenticator {
    /// Create an authenticator over the given collaborators.
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            directory,
            users,
            sessions,
        }
    }

    /// Authenticate `username`/`password` arriving from `source_ip`.
    ///
    /// Rejections come back as [`AuthOutcome`] values. `Err` means a
    /// collaborator failed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        source_ip: &str,
    ) -> Result<AuthOutcome> {
        let Some(user) = self.login(username, password).await? else {
            log::warn!("Login rejected for '{username}' from {source_ip}");
            return Ok(AuthOutcome::UserNamePasswdError);
        };

        let Some(session) = self.sessions.create_if_absent(&user, source_ip).await? else {
            log::warn!(
                "Session store issued no session for '{}' (id {}) from {source_ip}",
                user.username,
                user.id
            );
            return Ok(AuthOutcome::LoginSessionFailed);
        };

        log::info!("User '{}' logged in from {source_ip}", user.username);
        Ok(AuthOutcome::Success(SessionPayload::new(
            &session,
            self.directory.auth_type(),
        )))
    }

    /// End `user`'s sessions from `source_ip`.
    pub async fn sign_out(&self, user: &User, source_ip: &str) -> Result<()> {
        self.sessions.sign_out(user.id, source_ip).await?;
        Ok(())
    }

    /// Resolve credentials to a local user, provisioning one if policy allows.
    ///
    /// `Ok(None)` covers both a directory rejection and an unknown identity
    /// under a deny policy; callers cannot tell them apart.
    async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let result = self.directory.login(username, password).await?;
        if !result.success {
            log::debug!("Directory rejected credentials for '{username}'");
            return Ok(None);
        }

        // The directory may canonicalise the login name (case, aliases).
        let identity = if result.username.is_empty() {
            username.to_string()
        } else {
            result.username.clone()
        };
        let username = identity.as_str();

        if let Some(user) = self.users.find_by_username(username).await? {
            log::debug!("Directory user '{username}' maps to local user {}", user.id);
            return Ok(Some(user));
        }

        if !self.directory.create_if_absent() {
            log::debug!(
                "No local user for '{username}' and policy is {}",
                self.directory.not_exist_action()
            );
            return Ok(None);
        }

        let new_user = NewUser {
            username: username.to_string(),
            email: result.email,
            user_type: result.user_type,
            state: UserState::Active,
        };

        match self.users.create(new_user).await {
            Ok(user) => {
                log::info!(
                    "Provisioned local user '{}' (id {}, {})",
                    user.username,
                    user.id,
                    user.user_type
                );
                Ok(Some(user))
            }
            Err(StoreError::Conflict { username: taken }) => {
                // Another login provisioned the same user first.
                log::debug!("Concurrent provisioning of '{taken}', re-reading");
                match self.users.find_by_username(username).await? {
                    Some(user) => Ok(Some(user)),
                    None => Err(StoreError::Conflict { username: taken }.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
