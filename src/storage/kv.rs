// src/storage/kv.rs
//
// Key/value storage substrate.
//
// PRINCIPLES:
// - The contract is deliberately small: strings in, strings out
// - Reads distinguish "absent" from "failed"
// - Writes may fail (disk full, locked database); callers decide policy
// - Thread-safe access through a connection pool

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Type alias for the connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Synchronous string storage, the shape the catalog repositories persist
/// through. Implementations must tolerate concurrent use.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// Default on-disk location: {APP_DATA}/streamvault/streamvault.db
pub fn default_store_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let vault_dir = app_data_dir.join("streamvault");
    std::fs::create_dir_all(&vault_dir).map_err(AppError::Io)?;

    Ok(vault_dir.join("streamvault.db"))
}

/// SQLite-backed store: one `kv_store` table of key/value rows, WAL mode,
/// pooled connections.
pub struct SqliteKeyValueStore {
    pool: ConnectionPool,
}

impl SqliteKeyValueStore {
    /// Open (or create) the store at the platform data directory.
    pub fn open_default() -> AppResult<Self> {
        Self::open_at(&default_store_path()?)
    }

    /// Open (or create) the store at an explicit path.
    pub fn open_at(path: &Path) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        });

        let pool = Pool::builder().max_size(4).build(manager)?;

        {
            let conn = pool.get()?;
            conn.execute(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                )",
                [],
            )?;
        }

        Ok(Self { pool })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;
        match conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Storage(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| AppError::Other("Storage mutex poisoned".to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| AppError::Other("Storage mutex poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| AppError::Other("Storage mutex poisoned".to_string()))?;
        items.remove(key);
        Ok(())
    }
}
