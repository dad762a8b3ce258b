//! Login outcomes and their wire status codes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::directory::AuthenticationType;
use crate::session::Session;

/// Payload key carrying the session token.
pub const SESSION_ID: &str = "sessionId";

/// Payload key carrying the authentication type.
pub const SECURITY_CONFIG_TYPE: &str = "securityConfigType";

/// A stable status code and message, as seen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    /// Numeric status code.
    pub code: i32,
    /// Human-readable message.
    pub msg: &'static str,
}

impl Status {
    /// Login succeeded.
    pub const SUCCESS: Status = Status {
        code: 0,
        msg: "success",
    };

    /// Credentials rejected, or unknown identity under a deny policy.
    pub const USER_NAME_PASSWD_ERROR: Status = Status {
        code: 10013,
        msg: "user name or password error",
    };

    /// Identity was fine but no session could be issued.
    pub const LOGIN_SESSION_FAILED: Status = Status {
        code: 10102,
        msg: "create session failed!",
    };
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.msg, self.code)
    }
}

/// Session-identifying fields returned on a successful login.
///
/// Only constructible from a [`Session`], so a success always names one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPayload(BTreeMap<String, String>);

impl SessionPayload {
    /// Build the payload for `session`.
    pub fn new(session: &Session, auth_type: AuthenticationType) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(SESSION_ID.to_string(), session.id.clone());
        fields.insert(SECURITY_CONFIG_TYPE.to_string(), auth_type.to_string());
        Self(fields)
    }

    /// The session token.
    pub fn session_id(&self) -> &str {
        self.get(SESSION_ID).unwrap_or_default()
    }

    /// Look a field up by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// All fields.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

/// Result of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Logged in; carries the session fields.
    Success(SessionPayload),
    /// Bad credentials, or an unknown identity that may not be provisioned.
    UserNamePasswdError,
    /// Identity accepted but the session store issued no session.
    LoginSessionFailed,
}

impl AuthOutcome {
    /// The wire status for this outcome.
    pub fn status(&self) -> Status {
        match self {
            Self::Success(_) => Status::SUCCESS,
            Self::UserNamePasswdError => Status::USER_NAME_PASSWD_ERROR,
            Self::LoginSessionFailed => Status::LOGIN_SESSION_FAILED,
        }
    }

    /// Shorthand for `self.status().code`.
    pub fn code(&self) -> i32 {
        self.status().code
    }

    /// Returns `true` for [`AuthOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The session payload, on success.
    pub fn payload(&self) -> Option<&SessionPayload> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Boundary representation of an [`AuthOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    /// Numeric status code.
    pub code: i32,
    /// Human-readable message.
    pub msg: String,
    /// Session fields, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

impl From<AuthOutcome> for AuthResult {
    fn from(outcome: AuthOutcome) -> Self {
        let status = outcome.status();
        let data = match outcome {
            AuthOutcome::Success(payload) => Some(payload.0),
            _ => None,
        };
        Self {
            code: status.code,
            msg: status.msg.to_string(),
            data,
        }
    }
}
