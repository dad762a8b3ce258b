//! Integration tests for concurrent logins.

use futures::future::join_all;
use vestibule_auth::{NotExistAction, UserStore};

use crate::common::{PASSWORD, TestHarness, USERNAME};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_logins_provision_one_user() {
    let harness = TestHarness::new(NotExistAction::Create);

    let logins = (0..16).map(|i| {
        let auth = harness.authenticator.clone();
        tokio::spawn(async move {
            let ip = format!("10.0.0.{i}");
            auth.authenticate(USERNAME, PASSWORD, &ip).await
        })
    });

    for joined in join_all(logins).await {
        let outcome = joined.unwrap().unwrap();
        assert!(outcome.is_success());
    }

    assert_eq!(harness.users.len().await, 1);
    let user = harness.users.find_by_username(USERNAME).await.unwrap().unwrap();
    assert_eq!(user.id, 1);
    // One session per source address.
    assert_eq!(harness.sessions.len().await, 16);
}
