//! Storage abstractions for the wishlist application

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::{InMemorySessionStore, InMemoryUserStore, InMemoryWishlistStore};
pub use models::*;
pub use sqlite::SqliteStore;

use crate::error::WishlistError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, WishlistError>;

/// Trait for user account storage
pub trait UserStore: Send + Sync {
    /// Create a new user with the given password hash.
    /// Fails with `WishlistError::UsernameTaken` if the username exists.
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<UserId>;

    /// Get a user by ID
    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>>;

    /// Get a user by username
    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

/// Trait for session storage
pub trait SessionStore: Send + Sync {
    /// Create a new session for a user
    fn create(&self, user_id: UserId) -> StoreResult<Session>;

    /// Get a session by ID
    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>>;

    /// Delete a session (no-op if it does not exist)
    fn delete(&self, session_id: &SessionId) -> StoreResult<()>;
}

/// Trait for wishlist item storage.
///
/// Every lookup and mutation is filtered by owner as well as item id; that
/// double check is the only item-level access control in the system.
pub trait WishlistStore: Send + Sync {
    /// All items owned by the given user, in insertion order
    fn list_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<WishlistItem>>;

    /// Create a new item with a freshly assigned id
    fn add_item(&self, owner_id: UserId, name: &str, description: &str)
        -> StoreResult<WishlistItem>;

    /// Get an item only if it exists and is owned by `owner_id`
    fn find_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<Option<WishlistItem>>;

    /// Mutate name/description under the same ownership guard.
    /// Returns whether a mutation occurred.
    fn update_item(
        &self,
        id: ItemId,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<bool>;

    /// Remove an item under the same ownership guard.
    /// Returns whether a deletion occurred.
    fn delete_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<bool>;
}
