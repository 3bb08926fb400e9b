//! Application state shared across request handlers

use crate::store::{SessionStore, UserStore, WishlistStore};

/// Application state: the three stores behind their trait surfaces.
/// Handlers never see which variant is in use.
pub struct AppState<U, S, W> {
    pub user_store: U,
    pub session_store: S,
    pub wishlist_store: W,
}

impl<U, S, W> AppState<U, S, W>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    pub fn new(user_store: U, session_store: S, wishlist_store: W) -> Self {
        Self {
            user_store,
            session_store,
            wishlist_store,
        }
    }
}
