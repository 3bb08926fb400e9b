//! Tests for credential authentication

mod common;

use common::{create_test_server, create_user, register, session_cookie};

/// Test: login with an unknown username redirects back to the login form
#[tokio::test]
async fn test_login_unknown_username() {
    let server = create_test_server();

    let response = server
        .post("/login")
        .form(&[("username", "nobody"), ("password", "somepassword")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
    assert!(response.maybe_cookie("wishlist_session").is_none());

    let flash = response.maybe_cookie("wishlist_flash").expect("No flash cookie");
    assert_eq!(flash.value(), "Incorrect%20username.");
}

/// Test: login with the wrong password redirects back with a flash message
#[tokio::test]
async fn test_login_wrong_password() {
    let server = create_test_server();
    register(&server, "alice", "correctpassword").await;

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "wrongpassword")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
    assert!(response.maybe_cookie("wishlist_session").is_none());

    let flash = response.maybe_cookie("wishlist_flash").expect("No flash cookie");
    assert_eq!(flash.value(), "Incorrect%20password.");
}

/// Test: successful login sets the session cookie and redirects home
#[tokio::test]
async fn test_login_sets_session_cookie() {
    let server = create_test_server();
    register(&server, "alice", "pw123").await;

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "pw123")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
    assert!(response.maybe_cookie("wishlist_session").is_some());
}

/// Test: wrong password keeps failing no matter how many attempts came
/// before, and the right password still works afterwards (no lockout)
#[tokio::test]
async fn test_no_lockout_after_failed_attempts() {
    let server = create_test_server();
    register(&server, "alice", "pw123").await;

    for _ in 0..5 {
        let response = server
            .post("/login")
            .form(&[("username", "alice"), ("password", "bad")])
            .await;
        assert_eq!(response.header("location"), "/login");
        assert!(response.maybe_cookie("wishlist_session").is_none());
    }

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "pw123")])
        .await;
    assert_eq!(response.header("location"), "/");
    assert!(response.maybe_cookie("wishlist_session").is_some());
}

/// Test: each login issues a distinct opaque token
#[tokio::test]
async fn test_sessions_are_distinct() {
    let server = create_test_server();

    let first = create_user(&server, "alice", "pw123").await;
    let second = common::login(&server, "alice", "pw123").await;

    assert_ne!(first, second);

    // Both sessions resolve to the same account
    for session in [first, second] {
        let response = server.get("/").add_cookie(session_cookie(&session)).await;
        assert_eq!(response.status_code(), 200);
        assert!(response.text().contains("alice"));
    }
}
