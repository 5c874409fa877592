//! SQLite-backed snapshot store.

use crate::{SnapshotStore, StorageError, StorageResult, StoredSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use sharedboard_types::BoardState;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Persistent snapshot store backed by SQLite.
///
/// Cloning is cheap and shares the underlying connection.
#[derive(Clone)]
pub struct SqliteSnapshotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::with_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS board_state (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                state TEXT NOT NULL,
                version INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Writes the snapshot unless a newer version is already stored.
    pub fn save_blocking(&self, state: &BoardState) -> StorageResult<bool> {
        let changed = self.upsert(
            state,
            "INSERT INTO board_state (id, state, version, updated_at) VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 state = excluded.state,
                 version = excluded.version,
                 updated_at = excluded.updated_at
             WHERE excluded.version >= board_state.version",
        )?;

        if changed == 0 {
            debug!("Skipped stale snapshot at version {}", state.version);
        }
        Ok(changed > 0)
    }

    /// Writes the snapshot unconditionally.
    pub fn replace_blocking(&self, state: &BoardState) -> StorageResult<()> {
        self.upsert(
            state,
            "INSERT OR REPLACE INTO board_state (id, state, version, updated_at)
             VALUES (1, ?1, ?2, ?3)",
        )?;
        Ok(())
    }

    fn upsert(&self, state: &BoardState, sql: &str) -> StorageResult<usize> {
        let json = serde_json::to_string(state)?;
        let version = i64::try_from(state.version).map_err(|_| {
            StorageError::InvalidData(format!("version {} overflows", state.version))
        })?;
        let updated_at = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        Ok(conn.execute(sql, params![json, version, updated_at])?)
    }

    /// Reads the stored snapshot, if any.
    pub fn load_blocking(&self) -> StorageResult<Option<StoredSnapshot>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT state, version, updated_at FROM board_state WHERE id = 1",
                [],
                |row| {
                    let state: String = row.get(0)?;
                    let version: i64 = row.get(1)?;
                    let updated_at: String = row.get(2)?;
                    Ok((state, version, updated_at))
                },
            )
            .optional()?;
        drop(conn);

        let Some((json, version, updated_at)) = row else {
            return Ok(None);
        };

        let mut state: BoardState = serde_json::from_str(&json)?;
        state.version = u64::try_from(version)
            .map_err(|_| StorageError::InvalidData(format!("negative version {version}")))?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|e| StorageError::InvalidData(format!("invalid updated_at: {e}")))?
            .with_timezone(&Utc);

        Ok(Some(StoredSnapshot { state, updated_at }))
    }

    /// Deletes the stored snapshot.
    pub fn clear(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM board_state", [])?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn save(&self, state: &BoardState) -> StorageResult<bool> {
        let store = self.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || store.save_blocking(&state))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }

    async fn replace(&self, state: &BoardState) -> StorageResult<()> {
        let store = self.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || store.replace_blocking(&state))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }

    async fn load(&self) -> StorageResult<Option<StoredSnapshot>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load_blocking())
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }
}
