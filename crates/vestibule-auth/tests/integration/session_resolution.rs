//! Integration tests for resolving callers from session tokens.

use http::Request;
use vestibule_auth::{NotExistAction, Session, SessionStore};

use crate::common::{IP, PASSWORD, TestHarness, USERNAME};

async fn logged_in() -> (TestHarness, String) {
    let harness = TestHarness::new(NotExistAction::Create);
    let outcome = harness
        .authenticator
        .authenticate(USERNAME, PASSWORD, IP)
        .await
        .unwrap();
    let token = outcome.payload().unwrap().session_id().to_string();
    (harness, token)
}

#[tokio::test]
async fn test_header_token_resolves_user() {
    let (harness, token) = logged_in().await;
    let req = Request::builder()
        .header("sessionId", token.as_str())
        .body(())
        .unwrap();

    let user = harness.resolver.get_auth_user(&req).await.unwrap();
    assert_eq!(user.map(|u| u.username), Some(USERNAME.to_string()));
}

#[tokio::test]
async fn test_cookie_token_resolves_user() {
    let (harness, token) = logged_in().await;
    let req = Request::builder()
        .header(http::header::COOKIE, format!("sessionId={token}"))
        .body(())
        .unwrap();
    let (parts, _) = req.into_parts();

    assert!(harness.resolver.get_auth_user(&parts).await.unwrap().is_some());
}

#[tokio::test]
async fn test_absent_session_resolves_nothing() {
    let (harness, _) = logged_in().await;
    assert!(
        harness
            .resolver
            .get_auth_user("00000000-0000-0000-0000-000000000000")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_session_for_deleted_user_resolves_nothing() {
    let (harness, _) = logged_in().await;
    let orphan = Session::new(404, IP);
    harness.sessions.insert(orphan.clone()).await;

    let found = harness.sessions.find_by_token(&orphan.id).await.unwrap();
    assert!(found.is_some());
    assert!(harness.resolver.get_auth_user(orphan.id.as_str()).await.unwrap().is_none());
}
