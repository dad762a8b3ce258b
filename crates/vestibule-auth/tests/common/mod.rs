//! Common test utilities and harness for vestibule-auth integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vestibule_auth::memory::{MemorySessionStore, MemoryUserStore};
use vestibule_auth::{
    Authenticator, DirectoryLoginResult, DirectoryService, NotExistAction, Result, SessionResolver,
    UserType,
};

pub const USERNAME: &str = "test";
pub const PASSWORD: &str = "password";
pub const EMAIL: &str = "test@example.com";
pub const IP: &str = "127.0.0.1";

/// Directory whose answers and policy are scripted by the test.
///
/// Unscripted credentials are rejected.
pub struct ScriptedDirectory {
    results: Mutex<HashMap<(String, String), DirectoryLoginResult>>,
    action: Mutex<NotExistAction>,
    logins: Mutex<usize>,
}

impl ScriptedDirectory {
    pub fn new(action: NotExistAction) -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            action: Mutex::new(action),
            logins: Mutex::new(0),
        }
    }

    /// Script the answer for a username/password pair.
    pub fn answer(&self, username: &str, password: &str, result: DirectoryLoginResult) {
        self.results
            .lock()
            .unwrap()
            .insert((username.to_string(), password.to_string()), result);
    }

    pub fn set_action(&self, action: NotExistAction) {
        *self.action.lock().unwrap() = action;
    }

    pub fn login_count(&self) -> usize {
        *self.logins.lock().unwrap()
    }
}

#[async_trait]
impl DirectoryService for ScriptedDirectory {
    async fn login(&self, username: &str, password: &str) -> Result<DirectoryLoginResult> {
        *self.logins.lock().unwrap() += 1;
        let scripted = self
            .results
            .lock()
            .unwrap()
            .get(&(username.to_string(), password.to_string()))
            .cloned();
        Ok(scripted.unwrap_or_else(|| DirectoryLoginResult::rejected(username)))
    }

    fn not_exist_action(&self) -> NotExistAction {
        *self.action.lock().unwrap()
    }
}

/// Test harness wiring a scripted directory to the in-memory stores.
pub struct TestHarness {
    pub directory: Arc<ScriptedDirectory>,
    pub users: Arc<MemoryUserStore>,
    pub sessions: Arc<MemorySessionStore>,
    pub authenticator: Authenticator,
    pub resolver: SessionResolver,
}

impl TestHarness {
    /// A harness whose directory accepts `test`/`password` and rejects
    /// `test`/`123`.
    pub fn new(action: NotExistAction) -> Self {
        let directory = Arc::new(ScriptedDirectory::new(action));
        directory.answer(
            USERNAME,
            PASSWORD,
            DirectoryLoginResult::accepted(USERNAME, EMAIL, UserType::GeneralUser),
        );
        directory.answer(
            USERNAME,
            "123",
            DirectoryLoginResult {
                success: false,
                email: EMAIL.to_string(),
                user_type: UserType::GeneralUser,
                username: USERNAME.to_string(),
            },
        );

        let users = Arc::new(MemoryUserStore::new());
        let sessions = Arc::new(MemorySessionStore::default());
        let authenticator = Authenticator::new(directory.clone(), users.clone(), sessions.clone());
        let resolver = SessionResolver::new(users.clone(), sessions.clone());

        Self {
            directory,
            users,
            sessions,
            authenticator,
            resolver,
        }
    }
}
