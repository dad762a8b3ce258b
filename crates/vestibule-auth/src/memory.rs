//! In-memory user and session stores.
//!
//! Suitable for tests, development, and single-process deployments. Both
//! stores are cheap to share behind an `Arc` and enforce the same contracts a
//! database-backed store must: unique usernames and create-if-absent
//! sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::session::Session;
use crate::store::{SessionStore, UserStore};
use crate::user::{NewUser, User};

/// Default session lifetime in seconds (two hours).
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 7200;

// ============================================================================
// MemoryUserStore
// ============================================================================

#[derive(Default)]
struct UserTable {
    next_id: i32,
    by_id: HashMap<i32, User>,
    by_username: HashMap<String, i32>,
}

/// User store held in process memory.
///
/// Ids are assigned sequentially from 1.
#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<UserTable>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users held.
    pub async fn len(&self) -> usize {
        self.table.read().await.by_id.len()
    }

    /// Returns `true` if no users are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .by_username
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        if table.by_username.contains_key(&user.username) {
            return Err(StoreError::Conflict {
                username: user.username,
            });
        }

        let id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::unavailable("user id space exhausted"))?;
        table.next_id = id;
        let created = User {
            id,
            username: user.username,
            email: user.email,
            user_type: user.user_type,
            state: user.state,
        };
        table
            .by_username
            .insert(created.username.clone(), created.id);
        table.by_id.insert(created.id, created.clone());
        log::debug!("Stored user '{}' as id {}", created.username, created.id);
        Ok(created)
    }
}

// ============================================================================
// MemorySessionStore
// ============================================================================

/// Session store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Seconds after the last login at which a session expires.
    pub timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
        }
    }
}

impl SessionSettings {
    fn timeout(&self) -> chrono::Duration {
        i64::try_from(self.timeout_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

/// Session store held in process memory.
///
/// A login from an IP that already holds a live session for the same user
/// reuses that session and refreshes its login time. Expired sessions are
/// invisible to lookups and dropped on the next login.
pub struct MemorySessionStore {
    settings: SessionSettings,
    sessions: RwLock<HashMap<String, Session>>,
    refuse: AtomicBool,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl MemorySessionStore {
    /// Create an empty store with the given settings.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            sessions: RwLock::new(HashMap::new()),
            refuse: AtomicBool::new(false),
        }
    }

    /// Make `create_if_absent` decline (`Ok(None)`) while `refuse` is set.
    pub fn refuse_sessions(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    /// Number of sessions held, including expired ones not yet dropped.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert a session as-is. Intended for seeding fixtures.
    pub async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.id.clone(), session);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_if_absent(&self, user: &User, ip: &str) -> Result<Option<Session>, StoreError> {
        if self.refuse.load(Ordering::SeqCst) {
            log::debug!("Refusing session for user {}", user.id);
            return Ok(None);
        }

        let now = Utc::now();
        let timeout = self.settings.timeout();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| s.is_live_at(now, timeout));
        if sessions.len() < before {
            log::debug!("Dropped {} expired session(s)", before - sessions.len());
        }

        if let Some(existing) = sessions
            .values_mut()
            .find(|s| s.user_id == user.id && s.ip == ip)
        {
            existing.last_login_time = now;
            log::debug!("Reusing session for user {} from {ip}", user.id);
            return Ok(Some(existing.clone()));
        }

        let session = Session::new(user.id, ip);
        sessions.insert(session.id.clone(), session.clone());
        log::debug!("Created session for user {} from {ip}", user.id);
        Ok(Some(session))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let now = Utc::now();
        let timeout = self.settings.timeout();
        Ok(self
            .sessions
            .read()
            .await
            .get(token)
            .filter(|s| s.is_live_at(now, timeout))
            .cloned())
    }

    async fn sign_out(&self, user_id: i32, ip: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !(s.user_id == user_id && s.ip == ip));
        log::info!(
            "Signed out user {user_id} from {ip} ({} session(s) removed)",
            before - sessions.len()
        );
        Ok(())
    }
}
