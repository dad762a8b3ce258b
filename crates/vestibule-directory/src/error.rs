//! Error types for vestibule-directory

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for vestibule-directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors that can occur while loading or validating directory settings
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DirectoryError {
    /// Settings are present but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file is not valid TOML for the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings file could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl DirectoryError {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        DirectoryError::Config(message.into())
    }
}
