//! Common test utilities for wishlist integration tests

use std::sync::Arc;

use axum_test::TestServer;
use wishlist::{routes, AppState, InMemorySessionStore, InMemoryUserStore, InMemoryWishlistStore};

/// Create a test server over the in-memory store variant
pub fn create_test_server() -> TestServer {
    let state = Arc::new(AppState::new(
        InMemoryUserStore::new(),
        InMemorySessionStore::new(),
        InMemoryWishlistStore::new(),
    ));

    let app = routes::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Register a user through the form endpoint
pub async fn register(server: &TestServer, username: &str, password: &str) {
    let response = server
        .post("/register")
        .form(&[
            ("username", username),
            ("password", password),
            ("confirm_password", password),
        ])
        .await;
    assert_eq!(response.status_code(), 303);
}

/// Log in and return the session cookie value
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await;
    assert_eq!(response.status_code(), 303);

    response
        .maybe_cookie("wishlist_session")
        .expect("No session cookie")
        .value()
        .to_string()
}

/// Register and log in, returning the session cookie value
pub async fn create_user(server: &TestServer, username: &str, password: &str) -> String {
    register(server, username, password).await;
    login(server, username, password).await
}

/// Session cookie for request building
pub fn session_cookie(value: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new("wishlist_session", value.to_string())
}
