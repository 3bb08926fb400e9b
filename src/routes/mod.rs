//! HTTP routes for the wishlist application

mod auth;
pub mod session;
mod wishlist;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::store::{SessionStore, UserStore, WishlistStore};

/// Create the router with all routes
pub fn create_router<U, S, W>(state: Arc<AppState<U, S, W>>) -> Router
where
    U: UserStore + 'static,
    S: SessionStore + 'static,
    W: WishlistStore + 'static,
{
    Router::new()
        .route("/", get(wishlist::index))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/add", get(wishlist::add_form).post(wishlist::add))
        .route("/update/{id}", get(wishlist::update_form).post(wishlist::update))
        .route("/delete/{id}", get(wishlist::delete))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
