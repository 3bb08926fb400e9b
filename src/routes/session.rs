//! Session and flash cookie helpers

use tower_cookies::{Cookie, Cookies};

use crate::store::{Session, SessionId, SessionStore};

pub const SESSION_COOKIE: &str = "wishlist_session";
pub const FLASH_COOKIE: &str = "wishlist_flash";

/// Resolve the session cookie to a live session, if any.
/// An absent or unknown token yields no identity.
pub fn get_session_from_cookies<S: SessionStore>(
    cookies: &Cookies,
    session_store: &S,
) -> Option<Session> {
    cookies.get(SESSION_COOKIE).and_then(|c| {
        let session_id = SessionId(c.value().to_string());
        session_store.get(&session_id).ok().flatten()
    })
}

/// Set the session cookie after a successful login
pub fn set_session_cookie(cookies: &Cookies, session_id: &str) {
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Clear the session cookie on logout
pub fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);
}

/// Read and clear the flash message left by a previous redirect
pub fn take_flash(cookies: &Cookies) -> Option<String> {
    let message = cookies.get(FLASH_COOKIE).map(|c| {
        urlencoding::decode(c.value())
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| c.value().to_string())
    })?;

    let cookie = Cookie::build((FLASH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);

    Some(message)
}
