//! Directory-backed authentication for Vestibule.
//!
//! Provides:
//! - [`Authenticator`] — Login against a [`DirectoryService`], with local
//!   provisioning governed by the directory's [`NotExistAction`]
//! - [`SessionResolver`] — Maps an inbound session token to its [`User`]
//! - [`UserStore`] / [`SessionStore`] — Storage seams, with in-memory
//!   implementations in [`memory`]
//! - [`SessionLayer`] / [`SessionService`] — Tower middleware that resolves
//!   the caller before a request reaches its handler
//! - [`AuthOutcome`] / [`Status`] — Login results and their stable codes
//! - [`AuthError`] / [`StoreError`] — Infrastructure failures

mod authenticator;
mod directory;
mod error;
pub mod memory;
mod middleware;
mod outcome;
mod resolver;
mod session;
mod store;
mod token;
mod user;

pub use authenticator::Authenticator;
pub use directory::{
    AuthenticationType, DirectoryLoginResult, DirectoryService, NotExistAction,
    UnknownNotExistAction,
};
pub use error::{AuthError, Result, StoreError};
pub use middleware::{SessionLayer, SessionService};
pub use outcome::{AuthOutcome, AuthResult, SECURITY_CONFIG_TYPE, SESSION_ID, SessionPayload, Status};
pub use resolver::SessionResolver;
pub use session::Session;
pub use store::{SessionStore, UserStore};
pub use token::{SessionTokenSource, token_from_headers};
pub use user::{NewUser, User, UserState, UserType, user_from_parts, username_from_parts};
