//! # Session Store
//!
//! Single owner of everything the client persists between launches: the
//! session token, the in-flight trip request id, and the last chosen
//! destination. All reads and writes go through this type; nothing else in
//! the app touches the database file.
//!
//! Backed by SQLite through a one-connection pool, which serializes
//! concurrent writers without any extra locking. Values are stored as JSON
//! under well-known keys and exposed only through typed accessors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::debug;

const KEY_TOKEN: &str = "token";
const KEY_REQUEST_ID: &str = "request_id";
const KEY_DESTINATION: &str = "destination";
const KEY_LAST_POSITION: &str = "last_position";

/// Errors from the session store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A picked destination, persisted so the confirm screen survives restarts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// Last known device position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StoredPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Serialized local key-value store
#[derive(Debug)]
pub struct SessionStore {
    pool: SqlitePool,
    rt: Runtime,
}

impl SessionStore {
    /// Open the store at the platform data directory.
    pub fn new() -> Result<Self> {
        Self::open_at(Self::default_path())
    }

    /// Open the store at an explicit path. Used by tests.
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rt = Runtime::new()?;
        let pool = rt.block_on(async {
            let options = SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true);

            // One connection keeps every write serialized.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await?;

            sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
            sqlx::query("PRAGMA synchronous=NORMAL").execute(&pool).await?;
            sqlx::query(
                "CREATE TABLE IF NOT EXISTS session (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
            )
            .execute(&pool)
            .await?;

            Ok::<_, sqlx::Error>(pool)
        })?;

        debug!(path = %path.display(), "session store opened");
        Ok(Self { pool, rt })
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("onride");
        path.push("session.db");
        path
    }

    /// Store a value under a key, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.rt.block_on(async {
            sqlx::query(
                "INSERT INTO session (key, value, updated_at) VALUES (?, ?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                               updated_at = excluded.updated_at",
            )
            .bind(key)
            .bind(&json)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
            Ok(())
        })
    }

    /// Fetch a value by key. Missing keys and stale values that no longer
    /// decode both read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let row: Option<(String,)> = self.rt.block_on(async {
            sqlx::query_as("SELECT value FROM session WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
        })?;

        match row {
            Some((json,)) => Ok(serde_json::from_str(&json).ok()),
            None => Ok(None),
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("DELETE FROM session WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    // --- typed accessors ---

    pub fn token(&self) -> Result<Option<String>> {
        self.get(KEY_TOKEN)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.set(KEY_TOKEN, &token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.remove(KEY_TOKEN)
    }

    /// Id of the trip request currently in flight, if any.
    pub fn active_request_id(&self) -> Result<Option<String>> {
        self.get(KEY_REQUEST_ID)
    }

    pub fn set_active_request_id(&self, request_id: &str) -> Result<()> {
        self.set(KEY_REQUEST_ID, &request_id)
    }

    pub fn clear_active_request_id(&self) -> Result<()> {
        self.remove(KEY_REQUEST_ID)
    }

    pub fn destination(&self) -> Result<Option<Destination>> {
        self.get(KEY_DESTINATION)
    }

    pub fn set_destination(&self, destination: &Destination) -> Result<()> {
        self.set(KEY_DESTINATION, destination)
    }

    pub fn last_position(&self) -> Result<Option<StoredPosition>> {
        self.get(KEY_LAST_POSITION)
    }

    pub fn set_last_position(&self, position: StoredPosition) -> Result<()> {
        self.set(KEY_LAST_POSITION, &position)
    }

    /// Drop everything; used at logout.
    pub fn clear_all(&self) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("DELETE FROM session").execute(&self.pool).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path().join("session.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_token_round_trip() {
        let (_dir, store) = store();
        assert_eq!(store.token().unwrap(), None);

        store.set_token("abc123").unwrap();
        assert_eq!(store.token().unwrap(), Some("abc123".to_string()));

        store.clear_token().unwrap();
        assert_eq!(store.token().unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = store();
        store.set_active_request_id("r1").unwrap();
        store.set_active_request_id("r2").unwrap();
        assert_eq!(store.active_request_id().unwrap(), Some("r2".to_string()));
    }

    #[test]
    fn test_destination_round_trip() {
        let (_dir, store) = store();
        let dest = Destination {
            latitude: -8.83,
            longitude: 13.23,
            address: "Rua A, Luanda".to_string(),
        };
        store.set_destination(&dest).unwrap();
        assert_eq!(store.destination().unwrap(), Some(dest));
    }

    #[test]
    fn test_undecodable_value_reads_as_none() {
        let (_dir, store) = store();
        store.set(KEY_DESTINATION, &"not a destination").unwrap();
        assert_eq!(store.destination().unwrap(), None);
    }

    #[test]
    fn test_clear_all() {
        let (_dir, store) = store();
        store.set_token("t").unwrap();
        store.set_active_request_id("r").unwrap();
        store.clear_all().unwrap();
        assert_eq!(store.token().unwrap(), None);
        assert_eq!(store.active_request_id().unwrap(), None);
    }
}
