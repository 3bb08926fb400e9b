//! Wishlist web application
//!
//! Users register, log in with session-cookie authentication, and manage
//! wishlist items scoped to their own account. State lives behind store
//! traits with an in-memory and a SQLite-backed implementation.

pub mod config;
pub mod crypto;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::WishlistError;
pub use state::AppState;
pub use store::{
    InMemorySessionStore, InMemoryUserStore, InMemoryWishlistStore, SessionStore, SqliteStore,
    UserStore, WishlistStore,
};
