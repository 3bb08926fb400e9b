//! Logs in and saves the session cookie for scripted testing.
//!
//! Posts the login form, captures the `wishlist_session` Set-Cookie value
//! and writes it to `session_cookie.txt` in the current directory.

use anyhow::{bail, Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let base_url =
        std::env::var("WISHLIST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let username = std::env::var("WISHLIST_USERNAME").unwrap_or_else(|_| "testuser".to_string());
    let password =
        std::env::var("WISHLIST_PASSWORD").unwrap_or_else(|_| "password123".to_string());

    // Redirects must stay unfollowed or the Set-Cookie header is lost
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let response = client
        .post(format!("{base_url}/login"))
        .form(&[("username", username.as_str()), ("password", password.as_str())])
        .send()
        .await
        .context("login request failed")?;

    let session_cookie = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("wishlist_session="));

    let Some(cookie) = session_cookie else {
        bail!("Failed to fetch session cookie");
    };

    // Keep only "wishlist_session=VALUE", dropping the attributes
    let value = cookie.split(';').next().unwrap_or(cookie);

    std::fs::write("session_cookie.txt", value).context("could not write session_cookie.txt")?;
    println!("Session cookie saved successfully!");

    Ok(())
}
