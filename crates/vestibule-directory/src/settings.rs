//! Directory and gateway settings.
//!
//! Settings are read from TOML:
//!
//! ```toml
//! [ldap]
//! urls = ["ldap://ldap.forumsys.com:389/"]
//! base_dn = "dc=example,dc=com"
//! username = "cn=read-only-admin,dc=example,dc=com"
//! password = "password"
//!
//! [ldap.user]
//! admin = "read-only-admin"
//! not_exist_action = "CREATE"
//!
//! [session]
//! timeout_secs = 7200
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vestibule_auth::memory::SessionSettings;
use vestibule_auth::{NotExistAction, UserType};

use crate::error::{DirectoryError, Result};

const REDACTED: &str = "<redacted>";

/// Everything needed to stand up the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Directory connection and policy.
    pub ldap: DirectorySettings,
    /// Session store settings.
    #[serde(default)]
    pub session: SessionSettings,
}

impl GatewaySettings {
    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.ldap.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading gateway settings from {}", path.display());
        Self::from_toml_str(&content)
    }
}

/// Connection, attribute mapping and provisioning policy for a directory.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    /// Directory server URLs, tried in order.
    pub urls: Vec<String>,
    /// Search base.
    pub base_dn: String,
    /// Service account used to search for users.
    pub username: String,
    /// Service account password.
    pub password: String,
    /// User attribute mapping and policy.
    pub user: UserSettings,
    /// TLS settings.
    pub ssl: SslSettings,
}

/// How directory entries map onto local users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Directory identity that is classified as an administrator.
    pub admin: String,
    /// Attribute holding the login name.
    pub identity_attribute: String,
    /// Attribute holding the email address.
    pub email_attribute: String,
    /// `CREATE` or `DENY`; anything else is treated as `DENY`.
    pub not_exist_action: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            admin: String::new(),
            identity_attribute: "uid".to_string(),
            email_attribute: "mail".to_string(),
            not_exist_action: NotExistAction::Deny.to_string(),
        }
    }
}

/// TLS trust settings.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SslSettings {
    /// Whether to connect over TLS.
    pub enable: bool,
    /// Path to the trust store.
    pub trust_store: String,
    /// Trust store password.
    pub trust_store_password: String,
}

impl DirectorySettings {
    /// The configured not-exist policy.
    ///
    /// Unrecognised values fall back to [`NotExistAction::Deny`].
    pub fn not_exist_action(&self) -> NotExistAction {
        match self.user.not_exist_action.parse() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("{e}; falling back to {}", NotExistAction::Deny);
                NotExistAction::Deny
            }
        }
    }

    /// Classify a directory identity.
    pub fn classify(&self, username: &str) -> UserType {
        if !self.user.admin.is_empty() && self.user.admin == username {
            UserType::AdminUser
        } else {
            UserType::GeneralUser
        }
    }

    /// Check that the settings describe a usable directory.
    pub fn validate(&self) -> Result<()> {
        if self.urls.iter().all(|u| u.trim().is_empty()) {
            return Err(DirectoryError::config(
                "at least one directory URL is required",
            ));
        }
        if self.base_dn.trim().is_empty() {
            return Err(DirectoryError::config("base_dn must not be empty"));
        }
        if self.ssl.enable && self.ssl.trust_store.trim().is_empty() {
            return Err(DirectoryError::config(
                "ssl.trust_store is required when ssl.enable is true",
            ));
        }
        Ok(())
    }
}

fn redact(secret: &str) -> &str {
    if secret.is_empty() { "" } else { REDACTED }
}

impl fmt::Debug for DirectorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorySettings")
            .field("urls", &self.urls)
            .field("base_dn", &self.base_dn)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("user", &self.user)
            .field("ssl", &self.ssl)
            .finish()
    }
}

impl fmt::Debug for SslSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslSettings")
            .field("enable", &self.enable)
            .field("trust_store", &self.trust_store)
            .field("trust_store_password", &redact(&self.trust_store_password))
            .finish()
    }
}
