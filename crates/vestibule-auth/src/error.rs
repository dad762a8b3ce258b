//! Auth-specific error types.
//!
//! Rejected credentials and failed session issuance are ordinary outcomes
//! (see [`AuthOutcome`](crate::AuthOutcome)); the errors here are
//! infrastructure faults in a collaborator.

/// Result type alias for vestibule-auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors reported by a user or session store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A user with this username already exists.
    #[error("user '{username}' already exists")]
    Conflict {
        /// Username that violated the uniqueness constraint.
        username: String,
    },

    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates a new unavailable error.
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        StoreError::Unavailable(message.into())
    }
}

/// Errors that can occur during authentication or session resolution.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The directory service could not be reached or answered garbage.
    #[error("directory service failure: {0}")]
    Directory(String),

    /// A user or session store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Creates a new directory failure.
    pub fn directory<S: Into<String>>(message: S) -> Self {
        AuthError::Directory(message.into())
    }

    /// Whether this error should result in a 4xx (vs. a 500).
    ///
    /// Every variant is a dependency fault, so this is currently always
    /// false; callers should still ask rather than assume.
    pub fn is_client_error(&self) -> bool {
        match self {
            AuthError::Directory(_) => false,
            AuthError::Store(_) => false,
        }
    }
}
