//! Data models for wishlist storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Unique wishlist item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Opaque session token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// A registered user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A wishlist entry owned by exactly one user
#[derive(Debug, Clone)]
pub struct WishlistItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
}

/// A login session binding an opaque token to a user
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
