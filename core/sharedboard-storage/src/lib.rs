//! Snapshot storage for SharedBoard.
//!
//! The board is checkpointed as a single row: the whole serialized
//! [`BoardState`] plus the time it was written. There is never more than one
//! board's worth of data on disk.
//!
//! # Architecture
//!
//! - [`SnapshotStore`] is the seam the sync engine talks to; it is async so
//!   callers can fire saves from the event loop without blocking it
//! - [`SqliteSnapshotStore`] implements it on top of a SQLite file (or an
//!   in-memory database in tests); queries run on the blocking pool
//! - Saves are reconciled by the board's logical version, so a late save of
//!   an older snapshot never overwrites a newer checkpoint

mod error;
mod snapshot_store;

pub use error::{StorageError, StorageResult};
pub use snapshot_store::SqliteSnapshotStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sharedboard_types::BoardState;

/// A checkpoint read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub state: BoardState,
    pub updated_at: DateTime<Utc>,
}

/// Durable home of the single board snapshot.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Upserts the snapshot.
    ///
    /// Returns `false` when the store already holds a newer version and the
    /// write was skipped.
    async fn save(&self, state: &BoardState) -> StorageResult<bool>;

    /// Writes the snapshot regardless of the stored version.
    async fn replace(&self, state: &BoardState) -> StorageResult<()>;

    /// Returns the stored snapshot, or `None` if nothing was saved yet.
    async fn load(&self) -> StorageResult<Option<StoredSnapshot>>;
}
