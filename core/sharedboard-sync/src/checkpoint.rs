//! Background persistence of the board.
//!
//! Checkpoints never block the hub and never fail it: every save runs as a
//! detached task and its outcome only reaches the log. Without a store the
//! checkpointer is inert and the board lives in memory only.

use crate::variant::Variant;
use sharedboard_storage::{SnapshotStore, StorageError};
use sharedboard_types::BoardState;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Fire-and-forget writer in front of an optional [`SnapshotStore`].
#[derive(Clone, Default)]
pub struct Checkpointer {
    store: Option<Arc<dyn SnapshotStore>>,
}

impl Checkpointer {
    /// Checkpoints into `store`.
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A checkpointer that drops every snapshot.
    #[must_use]
    pub fn disabled() -> Self {
        Self { store: None }
    }

    /// Returns true if snapshots are written anywhere.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Spawns a save of `state`.
    ///
    /// The returned handle may be dropped; the save still runs. Returns
    /// `None` when persistence is disabled. Must be called from within a
    /// Tokio runtime.
    pub fn checkpoint(&self, state: BoardState) -> Option<JoinHandle<()>> {
        let store = self.store.clone()?;
        Some(tokio::spawn(async move {
            match store.save(&state).await {
                Ok(true) => debug!("Checkpointed board at version {}", state.version),
                Ok(false) => debug!("Checkpoint of version {} superseded", state.version),
                Err(e) => warn!("Failed to checkpoint board at version {}: {}", state.version, e),
            }
        }))
    }
}

impl std::fmt::Debug for Checkpointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkpointer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Picks the board to start from.
///
/// Uses the stored snapshot when one exists and is consistent; otherwise
/// `fallback`. A stored row that cannot be decoded or is inconsistent is
/// overwritten with the fallback so later checkpoints are not shadowed by its
/// version. When the store itself cannot be read the row is left untouched.
pub async fn load_initial_state(
    store: Option<&dyn SnapshotStore>,
    fallback: Variant,
) -> BoardState {
    let Some(store) = store else {
        info!("Persistence disabled, starting from the {} layout", fallback);
        return fallback.board_state();
    };

    match store.load().await {
        Ok(Some(snapshot)) => match snapshot.state.validate() {
            Ok(()) => {
                info!(
                    "Restored board with {} pieces at version {} (saved {})",
                    snapshot.state.len(),
                    snapshot.state.version,
                    snapshot.updated_at
                );
                return snapshot.state;
            }
            Err(e) => warn!("Stored board is inconsistent ({}), discarding it", e),
        },
        Ok(None) => {
            info!("No stored board, starting from the {} layout", fallback);
            return fallback.board_state();
        }
        Err(e @ (StorageError::Serialization(_) | StorageError::InvalidData(_))) => {
            warn!("Stored board is unreadable ({}), discarding it", e);
        }
        Err(e) => {
            warn!(
                "Failed to load stored board, starting from the {} layout: {}",
                fallback, e
            );
            return fallback.board_state();
        }
    }

    let state = fallback.board_state();
    if let Err(e) = store.replace(&state).await {
        warn!("Failed to overwrite stored board: {}", e);
    }
    state
}
