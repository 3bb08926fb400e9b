//! Application error types

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

use crate::routes::session::FLASH_COOKIE;

#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(&'static str),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Item not found or unauthorized access")]
    ItemNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WishlistError {
    fn into_response(self) -> Response {
        match self {
            WishlistError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            WishlistError::InvalidCredentials(reason) => {
                // Bad credentials bounce back to the login form with a
                // read-once flash message carrying the reason.
                let mut response = Redirect::to("/login").into_response();
                let cookie = format!(
                    "{}={}; Path=/; HttpOnly",
                    FLASH_COOKIE,
                    urlencoding::encode(reason)
                );
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                response
            }
            WishlistError::UsernameTaken => {
                (StatusCode::CONFLICT, "Registration failed").into_response()
            }
            WishlistError::NotAuthenticated => Redirect::to("/login").into_response(),
            WishlistError::ItemNotFound => {
                (StatusCode::NOT_FOUND, "Item not found or unauthorized access").into_response()
            }
            WishlistError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
