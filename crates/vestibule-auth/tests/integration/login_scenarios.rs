//! Integration tests for the login decision table.

use vestibule_auth::{AuthOutcome, AuthResult, NotExistAction, Status, UserStore, UserType};

use crate::common::{EMAIL, IP, PASSWORD, TestHarness, USERNAME};

#[tokio::test]
async fn test_login_walkthrough_across_policies() {
    let harness = TestHarness::new(NotExistAction::Deny);
    let auth = &harness.authenticator;

    // Correct credentials, no local user, policy DENY: rejected.
    let outcome = auth.authenticate(USERNAME, PASSWORD, IP).await.unwrap();
    assert_eq!(outcome.code(), Status::USER_NAME_PASSWD_ERROR.code);

    // Same credentials, policy CREATE: provisioned and logged in.
    harness.directory.set_action(NotExistAction::Create);
    let outcome = auth.authenticate(USERNAME, PASSWORD, IP).await.unwrap();
    assert_eq!(outcome.code(), Status::SUCCESS.code);
    assert!(harness.users.find_by_username(USERNAME).await.unwrap().is_some());

    // Session store declines: session failure.
    harness.sessions.refuse_sessions(true);
    let outcome = auth.authenticate(USERNAME, PASSWORD, IP).await.unwrap();
    assert_eq!(outcome.code(), Status::LOGIN_SESSION_FAILED.code);

    // Wrong password: rejected even though the user now exists.
    harness.sessions.refuse_sessions(false);
    let outcome = auth.authenticate(USERNAME, "123", IP).await.unwrap();
    assert_eq!(outcome.code(), Status::USER_NAME_PASSWD_ERROR.code);
}

#[tokio::test]
async fn test_provisioned_user_takes_directory_attributes() {
    let harness = TestHarness::new(NotExistAction::Create);
    harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();

    let user = harness
        .users
        .find_by_username(USERNAME)
        .await
        .unwrap()
        .expect("user should be provisioned");
    assert_eq!(user.email, EMAIL);
    assert_eq!(user.user_type, UserType::GeneralUser);
    assert!(user.is_active());
}

#[tokio::test]
async fn test_session_failure_on_existing_user_path() {
    let harness = TestHarness::new(NotExistAction::Create);
    harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();

    harness.sessions.refuse_sessions(true);
    // Existing user, and DENY no longer matters because the user is known.
    harness.directory.set_action(NotExistAction::Deny);
    let outcome = harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();
    assert_eq!(outcome, AuthOutcome::LoginSessionFailed);
}

#[tokio::test]
async fn test_repeat_login_does_not_duplicate_user() {
    let harness = TestHarness::new(NotExistAction::Create);
    let first = harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();
    let second = harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();

    assert_eq!(harness.users.len().await, 1);
    // Same user from the same address reuses the session.
    assert_eq!(
        first.payload().unwrap().session_id(),
        second.payload().unwrap().session_id()
    );
    assert_eq!(harness.directory.login_count(), 2);
}

#[tokio::test]
async fn test_success_result_serialises_session_fields() {
    let harness = TestHarness::new(NotExistAction::Create);
    let outcome = harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();
    let session_id = outcome.payload().unwrap().session_id().to_string();

    let json = serde_json::to_value(AuthResult::from(outcome)).unwrap();
    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["sessionId"], session_id);
    assert_eq!(json["data"]["securityConfigType"], "LDAP");
}

#[tokio::test]
async fn test_sign_out_ends_session() {
    let harness = TestHarness::new(NotExistAction::Create);
    let outcome = harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();
    let token = outcome.payload().unwrap().session_id().to_string();
    let user = harness
        .resolver
        .get_auth_user(token.as_str())
        .await
        .unwrap()
        .unwrap();

    harness.authenticator.sign_out(&user, IP).await.unwrap();
    assert!(harness.resolver.get_auth_user(token.as_str()).await.unwrap().is_none());
}
