//! Registration, login and logout handlers

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::crypto::{hash_password, verify_password};
use crate::error::WishlistError;
use crate::pages;
use crate::state::AppState;
use crate::store::{SessionStore, UserStore, WishlistStore};

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// GET /register
pub async fn register_form() -> Html<String> {
    Html(pages::register())
}

/// POST /register
pub async fn register<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    if form.password != form.confirm_password {
        return Err(WishlistError::Validation(
            "Passwords do not match".to_string(),
        ));
    }

    let password_hash =
        hash_password(&form.password).map_err(|e| WishlistError::Internal(e.to_string()))?;

    state
        .user_store
        .create_user(&form.username, &password_hash)?;

    Ok(Redirect::to("/login"))
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /login
pub async fn login_form(cookies: Cookies) -> Html<String> {
    let flash = super::session::take_flash(&cookies);
    Html(pages::login(flash.as_deref()))
}

/// POST /login
pub async fn login<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    // Find user by username
    let user = state
        .user_store
        .get_user_by_username(&form.username)?
        .ok_or(WishlistError::InvalidCredentials("Incorrect username."))?;

    // Verify password
    let valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| WishlistError::Internal(e.to_string()))?;

    if !valid {
        return Err(WishlistError::InvalidCredentials("Incorrect password."));
    }

    // Create session
    let session = state.session_store.create(user.id)?;
    super::session::set_session_cookie(&cookies, &session.id.0);

    Ok(Redirect::to("/"))
}

/// GET /logout
///
/// Idempotent: logging out without a live session still succeeds.
pub async fn logout<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
) -> Redirect
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    if let Some(session) = super::session::get_session_from_cookies(&cookies, &state.session_store)
    {
        let _ = state.session_store.delete(&session.id);
    }

    super::session::clear_session_cookie(&cookies);

    Redirect::to("/")
}
