//! The directory service seam.
//!
//! A directory verifies credentials and describes the identity behind them.
//! It also carries the process-wide policy for identities that have no local
//! user yet; the value is fixed when the directory is constructed.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::user::UserType;

/// What to do when a directory-authenticated identity has no local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotExistAction {
    /// Provision a local user from the directory attributes.
    Create,
    /// Reject the login as if the credentials were wrong.
    #[default]
    Deny,
}

impl fmt::Display for NotExistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Deny => write!(f, "DENY"),
        }
    }
}

/// Error returned when a string names no [`NotExistAction`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown not-exist action '{0}' (expected CREATE or DENY)")]
pub struct UnknownNotExistAction(pub String);

impl FromStr for NotExistAction {
    type Err = UnknownNotExistAction;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "DENY" => Ok(Self::Deny),
            _ => Err(UnknownNotExistAction(s.to_string())),
        }
    }
}

/// Which kind of authentication a directory performs.
///
/// Reported to clients in the login payload as `securityConfigType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthenticationType {
    /// Local password check.
    Password,
    /// LDAP bind.
    Ldap,
}

impl fmt::Display for AuthenticationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password => write!(f, "PASSWORD"),
            Self::Ldap => write!(f, "LDAP"),
        }
    }
}

/// The directory's answer to a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLoginResult {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Email attribute of the identity.
    pub email: String,
    /// Role classification of the identity.
    pub user_type: UserType,
    /// Identity the directory resolved.
    pub username: String,
}

impl DirectoryLoginResult {
    /// An accepted login.
    pub fn accepted(
        username: impl Into<String>,
        email: impl Into<String>,
        user_type: UserType,
    ) -> Self {
        Self {
            success: true,
            email: email.into(),
            user_type,
            username: username.into(),
        }
    }

    /// A rejected login.
    pub fn rejected(username: impl Into<String>) -> Self {
        Self {
            success: false,
            email: String::new(),
            user_type: UserType::GeneralUser,
            username: username.into(),
        }
    }
}

/// Trait for verifying credentials against an external directory.
///
/// Implement this for each directory client (LDAP, a static table, ...).
/// `login` returns `Ok` with `success == false` for rejected credentials;
/// `Err` is reserved for the directory itself being unusable.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Check a username/password pair.
    async fn login(&self, username: &str, password: &str) -> Result<DirectoryLoginResult>;

    /// Policy for identities with no local user.
    fn not_exist_action(&self) -> NotExistAction;

    /// Whether unknown identities may be provisioned locally.
    fn create_if_absent(&self) -> bool {
        self.not_exist_action() == NotExistAction::Create
    }

    /// Kind of authentication this directory performs.
    fn auth_type(&self) -> AuthenticationType {
        AuthenticationType::Ldap
    }
}
