//! Session records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-side session binding an opaque token to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque session token.
    pub id: String,
    /// Id of the user this session belongs to.
    pub user_id: i32,
    /// Address the session was created from.
    pub ip: String,
    /// Time of the most recent login that created or reused this session.
    pub last_login_time: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session with a random token.
    pub fn new(user_id: i32, ip: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            ip: ip.into(),
            last_login_time: Utc::now(),
        }
    }

    /// Whether the session is still live at `now` for the given timeout.
    ///
    /// An expiry past the representable range never arrives.
    pub fn is_live_at(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        self.last_login_time
            .checked_add_signed(timeout)
            .is_none_or(|expiry| expiry > now)
    }
}
