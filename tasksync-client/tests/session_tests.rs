/// Integration tests for the authenticated session
///
/// These tests drive the session against the in-memory identity service:
/// - sign-up, sign-in, and sign-out transitions
/// - the fixed failure-code-to-notice mapping
/// - federated provider success, conflict, and cancellation
/// - backend-initiated invalidation observed through the watcher

mod common;

use common::{wait_for, TestContext, TEST_EMAIL, TEST_PASSWORD};
use tasksync_client::AuthError;
use tasksync_shared::auth::AuthCode;

#[tokio::test]
async fn test_sign_up_establishes_session() {
    let ctx = TestContext::new();

    let user = ctx
        .app
        .session()
        .sign_up_with_password("Test User", TEST_EMAIL, TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.email, TEST_EMAIL);
    assert_eq!(user.display_name.as_deref(), Some("Test User"));

    let state = ctx.app.session().state();
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some(user.id.as_str()));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_sign_out_clears_session() {
    let ctx = TestContext::new();
    ctx.sign_in().await;
    assert!(ctx.app.session().current_user().is_some());

    ctx.app.session().sign_out().await.unwrap();
    assert!(ctx.app.session().current_user().is_none());
}

#[tokio::test]
async fn test_sign_in_after_sign_out() {
    let ctx = TestContext::new();
    let user = ctx.sign_in().await;
    ctx.app.session().sign_out().await.unwrap();

    let again = ctx
        .app
        .session()
        .sign_in_with_password(TEST_EMAIL, TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(again.id, user.id);
    assert!(ctx.app.session().current_user().is_some());
}

#[tokio::test]
async fn test_unknown_email_maps_to_fixed_notice() {
    let ctx = TestContext::new();

    let err = ctx
        .app
        .session()
        .sign_in_with_password("ghost@example.com", "whatever-1")
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(AuthCode::UserNotFound));
    assert_eq!(err.to_string(), "No account found with this email");
    assert_eq!(
        ctx.app.session().state().error.as_deref(),
        Some("No account found with this email")
    );
    assert!(ctx.app.session().current_user().is_none());
}

#[tokio::test]
async fn test_wrong_password_notice() {
    let ctx = TestContext::new();
    ctx.sign_in().await;
    ctx.app.session().sign_out().await.unwrap();

    let err = ctx
        .app
        .session()
        .sign_in_with_password(TEST_EMAIL, "not-the-password")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Incorrect password");
    assert!(ctx.app.session().current_user().is_none());
}

#[tokio::test]
async fn test_malformed_email_notice() {
    let ctx = TestContext::new();

    let err = ctx
        .app
        .session()
        .sign_in_with_password("not-an-email", "whatever-1")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email address");
}

#[tokio::test]
async fn test_duplicate_email_notice() {
    let ctx = TestContext::new();
    ctx.sign_in().await;
    ctx.app.session().sign_out().await.unwrap();

    let err = ctx
        .app
        .session()
        .sign_up_with_password("Someone Else", TEST_EMAIL, "0ther-secret")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "An account with this email already exists"
    );
    assert!(ctx.app.session().current_user().is_none());
}

#[tokio::test]
async fn test_weak_password_notice() {
    let ctx = TestContext::new();

    let err = ctx
        .app
        .session()
        .sign_up_with_password("Test User", "weak@example.com", "abc")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Password is too weak");
}

#[tokio::test]
async fn test_provider_sign_in_success() {
    let ctx = TestContext::new();
    ctx.backend.set_provider_identity("fed@example.com", Some("Fed User"));

    let user = ctx.app.session().sign_in_with_provider().await.unwrap();
    assert_eq!(user.email, "fed@example.com");
    assert!(ctx.app.session().current_user().is_some());
}

#[tokio::test]
async fn test_provider_cancellation_notice() {
    let ctx = TestContext::new();

    let err = ctx.app.session().sign_in_with_provider().await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected(AuthCode::Cancelled)));
    assert_eq!(err.to_string(), "Sign-in was cancelled");
}

#[tokio::test]
async fn test_provider_conflict_notice() {
    let ctx = TestContext::new();
    ctx.sign_in().await;
    ctx.app.session().sign_out().await.unwrap();

    ctx.backend.set_provider_identity(TEST_EMAIL, None);
    let err = ctx.app.session().sign_in_with_provider().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "An account already exists with this email using a different sign-in method"
    );
}

#[tokio::test]
async fn test_failed_attempt_clears_previous_error_first() {
    let ctx = TestContext::new();

    let _ = ctx
        .app
        .session()
        .sign_in_with_password("ghost@example.com", "whatever-1")
        .await;
    assert!(ctx.app.session().state().error.is_some());

    // A successful flow wipes the stale notice
    ctx.sign_in().await;
    assert!(ctx.app.session().state().error.is_none());
}

#[tokio::test]
async fn test_backend_invalidation_signs_session_out() {
    let ctx = TestContext::new();
    ctx.sign_in().await;
    assert!(ctx.app.session().current_user().is_some());

    // No local call: the backend revokes the session on its own
    ctx.backend.revoke_session();

    let session = ctx.app.session().clone();
    wait_for(|| session.current_user().is_none(), 2)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_shutdown_signs_out() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let TestContext { backend, app } = ctx;
    app.shutdown().await.unwrap();

    // A fresh watcher sees no signed-in user
    let mut feed = backend.watch_session();
    backend.revoke_session();
    assert!(feed.recv().await.unwrap().is_none());
}
