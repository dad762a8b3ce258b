//! A directory backed by a fixed, in-process table of entries.
//!
//! Stands in for a real directory client in development and tests. Policy
//! and admin classification come from [`DirectorySettings`], exactly as they
//! would for a networked directory.

use std::collections::HashMap;

use async_trait::async_trait;
use vestibule_auth::{DirectoryLoginResult, DirectoryService, NotExistAction, Result};

use crate::settings::DirectorySettings;

/// A single directory entry.
#[derive(Clone, PartialEq, Eq)]
struct Entry {
    password: String,
    email: String,
}

/// Directory service over a static table of users.
pub struct StaticDirectory {
    settings: DirectorySettings,
    action: NotExistAction,
    entries: HashMap<String, Entry>,
}

impl StaticDirectory {
    /// Create an empty directory governed by `settings`.
    ///
    /// The not-exist policy is read once here and fixed for the lifetime of
    /// the directory.
    pub fn new(settings: DirectorySettings) -> Self {
        let action = settings.not_exist_action();
        log::info!(
            "Static directory over {} (base {}), not-exist action {action}",
            settings.urls.join(", "),
            settings.base_dn
        );
        Self {
            settings,
            action,
            entries: HashMap::new(),
        }
    }

    /// Add an entry, replacing any entry with the same username.
    #[must_use]
    pub fn with_entry(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            username.into(),
            Entry {
                password: password.into(),
                email: email.into(),
            },
        );
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The settings this directory was built from.
    pub fn settings(&self) -> &DirectorySettings {
        &self.settings
    }
}

#[async_trait]
impl DirectoryService for StaticDirectory {
    async fn login(&self, username: &str, password: &str) -> Result<DirectoryLoginResult> {
        match self.entries.get(username) {
            Some(entry) if !password.is_empty() && entry.password == password => {
                let user_type = self.settings.classify(username);
                log::debug!("Directory accepted '{username}' as {user_type}");
                Ok(DirectoryLoginResult::accepted(
                    username,
                    entry.email.clone(),
                    user_type,
                ))
            }
            Some(_) => {
                log::debug!("Directory rejected password for '{username}'");
                Ok(DirectoryLoginResult::rejected(username))
            }
            None => {
                log::debug!("Directory has no entry for '{username}'");
                Ok(DirectoryLoginResult::rejected(username))
            }
        }
    }

    fn not_exist_action(&self) -> NotExistAction {
        self.action
    }
}
