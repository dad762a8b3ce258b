//! Directory settings and providers for vestibule-auth.
//!
//! Provides:
//! - [`GatewaySettings`] / [`DirectorySettings`] — TOML configuration for the
//!   directory connection, attribute mapping, TLS trust and the not-exist
//!   policy
//! - [`StaticDirectory`] — A [`vestibule_auth::DirectoryService`] over a fixed
//!   table of entries, for development and tests
//! - [`DirectoryError`] — Settings loading and validation errors

#![warn(clippy::all)]

mod error;
mod settings;
mod static_directory;

pub use error::{DirectoryError, Result};
pub use settings::{DirectorySettings, GatewaySettings, SslSettings, UserSettings};
pub use static_directory::StaticDirectory;
