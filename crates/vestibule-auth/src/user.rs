//! Local user records and extraction helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a user, as reported by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Regular user.
    #[default]
    GeneralUser,
    /// Administrator.
    AdminUser,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeneralUser => write!(f, "GENERAL_USER"),
            Self::AdminUser => write!(f, "ADMIN_USER"),
        }
    }
}

/// Whether a local account may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserState {
    /// Account is enabled.
    #[default]
    Active,
    /// Account has been switched off by an administrator.
    Disabled,
}

/// A local user record, owned by the user store.
///
/// The authenticator reads these and asks the store to create them; it never
/// mutates one. After a successful session lookup the session guard stores
/// the resolved `User` in request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: i32,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role classification.
    pub user_type: UserType,
    /// Account state.
    pub state: UserState,
}

impl User {
    /// Returns `true` if the account is active.
    pub fn is_active(&self) -> bool {
        self.state == UserState::Active
    }
}

/// A request to provision a user. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role classification.
    pub user_type: UserType,
    /// Initial account state.
    pub state: UserState,
}

/// Extract the resolved [`User`] from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&User> {
    parts.extensions.get::<User>()
}

/// Extract the username from HTTP request `Parts`.
///
/// Returns `"anonymous"` if no user has been resolved for this request.
pub fn username_from_parts(parts: &http::request::Parts) -> &str {
    parts
        .extensions
        .get::<User>()
        .map(|u| u.username.as_str())
        .unwrap_or("anonymous")
}
