//! SQLite-based storage implementation

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{
    ItemId, Session, SessionId, SessionStore, StoreResult, User, UserId, UserStore, WishlistItem,
    WishlistStore,
};
use crate::error::WishlistError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQLite-based store implementing UserStore, SessionStore and WishlistStore
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> Result<Self, WishlistError> {
        let conn = Connection::open(path).map_err(|e| WishlistError::Internal(e.to_string()))?;

        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        // Run migrations
        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), WishlistError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, WishlistError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(|e| WishlistError::Internal(e.to_string()))
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), WishlistError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Users table
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Wishlist items, each owned by exactly one user
            CREATE TABLE IF NOT EXISTS wishlist_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_items_user_id ON wishlist_items(user_id);

            -- Sessions
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(())
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let username: String = row.get(1)?;
    let password_hash: String = row.get(2)?;
    let created_at: String = row.get(3)?;
    Ok(User {
        id: UserId(id as u64),
        username,
        password_hash,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<WishlistItem> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let description: String = row.get(2)?;
    let user_id: i64 = row.get(3)?;
    Ok(WishlistItem {
        id: ItemId(id as u64),
        name,
        description,
        owner_id: UserId(user_id as u64),
    })
}

impl UserStore for SqliteStore {
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<UserId> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![username, password_hash, now],
        )
        .map_err(|e| {
            if let rusqlite::Error::SqliteFailure(ref err, _) = e {
                if err.code == rusqlite::ErrorCode::ConstraintViolation {
                    return WishlistError::UsernameTaken;
                }
            }
            WishlistError::Internal(e.to_string())
        })?;

        let id = conn.last_insert_rowid() as u64;
        Ok(UserId(id))
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
            params![user_id.0 as i64],
            row_to_user,
        )
        .optional()
        .map_err(|e| WishlistError::Internal(e.to_string()))
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
            params![username],
            row_to_user,
        )
        .optional()
        .map_err(|e| WishlistError::Internal(e.to_string()))
    }
}

impl SessionStore for SqliteStore {
    fn create(&self, user_id: UserId) -> StoreResult<Session> {
        let conn = self.conn.lock().unwrap();
        let session = Session {
            id: SessionId(Uuid::new_v4().to_string()),
            user_id,
            created_at: Utc::now(),
        };

        conn.execute(
            "INSERT INTO sessions (id, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![
                session.id.0,
                session.user_id.0 as i64,
                session.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(session)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT id, user_id, created_at FROM sessions WHERE id = ?1",
            params![session_id.0],
            |row| {
                let id: String = row.get(0)?;
                let user_id: i64 = row.get(1)?;
                let created_at: String = row.get(2)?;
                Ok(Session {
                    id: SessionId(id),
                    user_id: UserId(user_id as u64),
                    created_at: DateTime::parse_from_rfc3339(&created_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                })
            },
        )
        .optional()
        .map_err(|e| WishlistError::Internal(e.to_string()))
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id.0])
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(())
    }
}

impl WishlistStore for SqliteStore {
    fn list_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<WishlistItem>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT id, name, description, user_id FROM wishlist_items
                 WHERE user_id = ?1 ORDER BY id",
            )
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        let items = stmt
            .query_map(params![owner_id.0 as i64], row_to_item)
            .map_err(|e| WishlistError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(items)
    }

    fn add_item(
        &self,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<WishlistItem> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO wishlist_items (name, description, user_id) VALUES (?1, ?2, ?3)",
            params![name, description, owner_id.0 as i64],
        )
        .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(WishlistItem {
            id: ItemId(conn.last_insert_rowid() as u64),
            name: name.to_string(),
            description: description.to_string(),
            owner_id,
        })
    }

    fn find_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<Option<WishlistItem>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT id, name, description, user_id FROM wishlist_items
             WHERE id = ?1 AND user_id = ?2",
            params![id.0 as i64, owner_id.0 as i64],
            row_to_item,
        )
        .optional()
        .map_err(|e| WishlistError::Internal(e.to_string()))
    }

    fn update_item(
        &self,
        id: ItemId,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn
            .execute(
                "UPDATE wishlist_items SET name = ?1, description = ?2
                 WHERE id = ?3 AND user_id = ?4",
                params![name, description, id.0 as i64, owner_id.0 as i64],
            )
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(rows_affected > 0)
    }

    fn delete_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn
            .execute(
                "DELETE FROM wishlist_items WHERE id = ?1 AND user_id = ?2",
                params![id.0 as i64, owner_id.0 as i64],
            )
            .map_err(|e| WishlistError::Internal(e.to_string()))?;

        Ok(rows_affected > 0)
    }
}

// Implement the traits for Arc<SqliteStore> so one database connection can
// serve as all three stores in AppState.
impl UserStore for std::sync::Arc<SqliteStore> {
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<UserId> {
        (**self).create_user(username, password_hash)
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        (**self).get_user(user_id)
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        (**self).get_user_by_username(username)
    }
}

impl SessionStore for std::sync::Arc<SqliteStore> {
    fn create(&self, user_id: UserId) -> StoreResult<Session> {
        (**self).create(user_id)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        (**self).get(session_id)
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        (**self).delete(session_id)
    }
}

impl WishlistStore for std::sync::Arc<SqliteStore> {
    fn list_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<WishlistItem>> {
        (**self).list_by_owner(owner_id)
    }

    fn add_item(
        &self,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<WishlistItem> {
        (**self).add_item(owner_id, name, description)
    }

    fn find_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<Option<WishlistItem>> {
        (**self).find_item(id, owner_id)
    }

    fn update_item(
        &self,
        id: ItemId,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> StoreResult<bool> {
        (**self).update_item(id, owner_id, name, description)
    }

    fn delete_item(&self, id: ItemId, owner_id: UserId) -> StoreResult<bool> {
        (**self).delete_item(id, owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
        (store, dir) // Return dir to keep it alive
    }

    #[test]
    fn test_create_user_and_lookup() {
        let (store, _dir) = create_test_store();

        let user_id = store.create_user("alice", "hashed_password").unwrap();

        let user = store.get_user_by_username("alice").unwrap();
        assert!(user.is_some());
        assert_eq!(user.unwrap().id, user_id);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (store, _dir) = create_test_store();

        store.create_user("alice", "hash1").unwrap();
        let result = store.create_user("alice", "hash2");
        assert!(matches!(result, Err(WishlistError::UsernameTaken)));
    }

    #[test]
    fn test_session_lifecycle() {
        let (store, _dir) = create_test_store();

        let user_id = store.create_user("alice", "hashed_password").unwrap();
        let session = store.create(user_id).unwrap();

        assert!(store.get(&session.id).unwrap().is_some());

        store.delete(&session.id).unwrap();
        assert!(store.get(&session.id).unwrap().is_none());
    }

    #[test]
    fn test_item_round_trip() {
        let (store, _dir) = create_test_store();

        let owner = store.create_user("alice", "hash").unwrap();
        let item = store.add_item(owner, "Bike", "A red one").unwrap();

        let found = store.find_item(item.id, owner).unwrap().unwrap();
        assert_eq!(found.name, "Bike");
        assert_eq!(found.description, "A red one");
    }

    #[test]
    fn test_owner_scoped_lookup() {
        let (store, _dir) = create_test_store();

        let alice = store.create_user("alice", "hash").unwrap();
        let bob = store.create_user("bob", "hash").unwrap();
        let item = store.add_item(alice, "Bike", "").unwrap();

        assert!(store.find_item(item.id, bob).unwrap().is_none());
        assert!(!store.update_item(item.id, bob, "Boat", "").unwrap());
        assert!(!store.delete_item(item.id, bob).unwrap());

        // Alice still sees the unmodified item
        let unchanged = store.find_item(item.id, alice).unwrap().unwrap();
        assert_eq!(unchanged.name, "Bike");
    }

    #[test]
    fn test_update_and_delete() {
        let (store, _dir) = create_test_store();

        let owner = store.create_user("alice", "hash").unwrap();
        let item = store.add_item(owner, "Bike", "old").unwrap();

        assert!(store.update_item(item.id, owner, "Boat", "new").unwrap());
        let updated = store.find_item(item.id, owner).unwrap().unwrap();
        assert_eq!(updated.name, "Boat");
        assert_eq!(updated.description, "new");

        assert!(store.delete_item(item.id, owner).unwrap());
        assert!(store.find_item(item.id, owner).unwrap().is_none());
        assert!(!store.delete_item(item.id, owner).unwrap());
    }

    #[test]
    fn test_list_in_insertion_order() {
        let (store, _dir) = create_test_store();

        let owner = store.create_user("alice", "hash").unwrap();
        store.add_item(owner, "Bike", "").unwrap();
        store.add_item(owner, "Book", "").unwrap();

        let items = store.list_by_owner(owner).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Bike");
        assert_eq!(items[1].name, "Book");
    }

    #[test]
    fn test_sessions_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");

        let session_id = {
            let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
            let user_id = store.create_user("alice", "hash").unwrap();
            store.create(user_id).unwrap().id
        };

        let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
        assert!(store.get(&session_id).unwrap().is_some());
    }
}
