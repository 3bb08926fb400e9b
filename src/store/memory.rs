//! In-memory storage implementations

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::{
    ItemId, Session, SessionId, SessionStore, StoreResult, User, UserId, UserStore, WishlistItem,
    WishlistStore,
};
use crate::error::WishlistError;

/// In-memory user store
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
    next_user_id: AtomicU64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_user_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<UserId> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == username) {
            return Err(WishlistError::UsernameTaken);
        }
        let id = UserId(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().unwrap().get(&user_id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

/// In-memory session store
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, user_id: UserId) -> StoreResult<Session> {
        let session = Session {
            id: SessionId(Uuid::new_v4().to_string()),
            user_id,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().unwrap().get(session_id).cloned())
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        self.sessions.write().unwrap().remove(session_id);
        Ok(())
    }
}

/// In-memory wishlist item store
pub struct InMemoryWishlistStore {
    items: RwLock<HashMap<ItemId, WishlistItem>>,
    next_item_id: AtomicU64,
}

impl InMemoryWishlistStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            next_item_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryWishlistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WishlistStore for InMemoryWishlistStore {
    fn list_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<WishlistItem>> {
        let items = self.items.read().unwrap();
        let mut owned: Vec<WishlistItem> = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|i| i.id.0);
        Ok(owned)
    }

    fn add_item(
        &self,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<WishlistItem> {
        let item = WishlistItem {
            id: ItemId(self.next_item_id.fetch_add(1, Ordering::SeqCst)),
            name: name.to_string(),
            description: description.to_string(),
            owner_id,
        };
        self.items.write().unwrap().insert(item.id, item.clone());
        Ok(item)
    }

    fn find_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<Option<WishlistItem>> {
        let items = self.items.read().unwrap();
        Ok(items
            .get(&id)
            .filter(|i| i.owner_id == owner_id)
            .cloned())
    }

    fn update_item(
        &self,
        id: ItemId,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<bool> {
        let mut items = self.items.write().unwrap();
        match items.get_mut(&id).filter(|i| i.owner_id == owner_id) {
            Some(item) => {
                item.name = name.to_string();
                item.description = description.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<bool> {
        let mut items = self.items.write().unwrap();
        if items.get(&id).is_some_and(|i| i.owner_id == owner_id) {
            items.remove(&id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
