//! Authoritative board state and broadcast hub for SharedBoard.
//!
//! Many clients watch and edit one shared board. This crate owns the single
//! canonical copy of that board and keeps every client in step with it.
//!
//! # Architecture
//!
//! - **Board**: the in-memory piece collection and its four mutation
//!   primitives (move, remove, create, reset)
//! - **Validation**: pure checks that drop malformed requests before they
//!   touch the board
//! - **Variant**: named starting layouts, built fresh on every request
//! - **Protocol**: the JSON events exchanged with clients
//! - **Checkpoint**: fire-and-forget saves to an optional snapshot store
//! - **Hub**: an actor that owns the board and the connection registry and
//!   fans every accepted change out to all connections
//!
//! ## Event flow
//!
//! 1. A client connects and receives the full snapshot, then everyone
//!    receives the new connection count
//! 2. Client events are validated; rejects are dropped without reply
//! 3. Accepted events mutate the board and are broadcast to every client,
//!    the sender included
//! 4. The new snapshot is checkpointed in the background
//!
//! # Example
//!
//! ```
//! use sharedboard_sync::{BoardHub, Checkpointer, HubConfig, Variant};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hub = BoardHub::new(
//!     Variant::Standard.board_state(),
//!     Checkpointer::disabled(),
//!     HubConfig::default(),
//! )
//! .spawn();
//!
//! let connection = hub.connect().await.unwrap();
//! # drop(connection);
//! # }
//! ```

pub mod board;
pub mod checkpoint;
mod error;
pub mod hub;
pub mod protocol;
pub mod validation;
pub mod variant;

pub use board::{BoardError, BoardStore};
pub use checkpoint::{Checkpointer, load_initial_state};
pub use error::{SyncError, SyncResult};
pub use hub::{BoardHub, Connection, ConnectionId, HubConfig, HubHandle, HubStats};
pub use protocol::{
    ClientEvent, CreatePieceRequest, MovePieceRequest, PieceMove, ResetRequest, ServerEvent,
};
pub use validation::{NewPiece, Rejection, ValidatedMove};
pub use variant::Variant;
