//! Shared snapshot stores for sync tests.

#![allow(dead_code)]

use async_trait::async_trait;
use sharedboard_storage::{
    SnapshotStore, SqliteSnapshotStore, StorageError, StorageResult, StoredSnapshot,
};
use sharedboard_types::BoardState;
use std::sync::Mutex;

/// A store whose every call fails, standing in for an unreachable database.
pub struct FailingStore;

#[async_trait]
impl SnapshotStore for FailingStore {
    async fn save(&self, _state: &BoardState) -> StorageResult<bool> {
        Err(StorageError::Task("offline".into()))
    }

    async fn replace(&self, _state: &BoardState) -> StorageResult<()> {
        Err(StorageError::Task("offline".into()))
    }

    async fn load(&self) -> StorageResult<Option<StoredSnapshot>> {
        Err(StorageError::Task("offline".into()))
    }
}

/// An in-memory SQLite store whose first `load` fails with a chosen error.
pub struct FirstLoadFails {
    pub inner: SqliteSnapshotStore,
    error: Mutex<Option<StorageError>>,
}

impl FirstLoadFails {
    pub fn new(inner: SqliteSnapshotStore, error: StorageError) -> Self {
        Self {
            inner,
            error: Mutex::new(Some(error)),
        }
    }
}

#[async_trait]
impl SnapshotStore for FirstLoadFails {
    async fn save(&self, state: &BoardState) -> StorageResult<bool> {
        self.inner.save(state).await
    }

    async fn replace(&self, state: &BoardState) -> StorageResult<()> {
        self.inner.replace(state).await
    }

    async fn load(&self) -> StorageResult<Option<StoredSnapshot>> {
        let error = self.error.lock().unwrap().take();
        match error {
            Some(e) => Err(e),
            None => self.inner.load().await,
        }
    }
}
