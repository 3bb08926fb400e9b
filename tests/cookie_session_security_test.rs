//! Tests for session cookie and flash message behavior

mod common;

use common::{create_test_server, register, session_cookie};

/// Test: the index redirects to the login page when unauthenticated
#[tokio::test]
async fn test_index_redirects_when_unauthenticated() {
    let server = create_test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
}

/// Test: a bogus session cookie is treated as unauthenticated
#[tokio::test]
async fn test_bogus_session_cookie_unauthenticated() {
    let server = create_test_server();

    let response = server
        .get("/")
        .add_cookie(session_cookie("invalid-session-id"))
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
}

/// Test: the session cookie is HttpOnly
#[tokio::test]
async fn test_session_cookie_is_httponly() {
    let server = create_test_server();
    register(&server, "alice", "pw123").await;

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "pw123")])
        .await;

    let cookie = response
        .maybe_cookie("wishlist_session")
        .expect("No session cookie");
    assert_eq!(cookie.http_only(), Some(true));
}

/// Test: the flash message renders once on the next login page, then clears
#[tokio::test]
async fn test_flash_message_is_read_once() {
    let server = create_test_server();
    register(&server, "alice", "pw123").await;

    let response = server
        .post("/login")
        .form(&[("username", "alice"), ("password", "bad")])
        .await;
    let flash = response
        .maybe_cookie("wishlist_flash")
        .expect("No flash cookie");

    // The next rendered login page shows the message and clears the cookie
    let response = server
        .get("/login")
        .add_cookie(cookie::Cookie::new("wishlist_flash", flash.value().to_string()))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Incorrect password."));

    let cleared = response
        .maybe_cookie("wishlist_flash")
        .expect("Flash cookie was not cleared");
    assert_eq!(cleared.value(), "");
}

/// Test: the login page renders without a flash message by default
#[tokio::test]
async fn test_login_page_without_flash() {
    let server = create_test_server();

    let response = server.get("/login").await;

    assert_eq!(response.status_code(), 200);
    assert!(!response.text().contains("Incorrect"));
}
