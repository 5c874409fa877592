//! The session hub: single owner of the board and the connection registry.
//!
//! [`BoardHub`] runs as one task and handles [`HubCommand`]s strictly one at
//! a time. Command handling never awaits, so every mutation and the
//! broadcast that follows it happen without interleaving with any other
//! client's event. Everything else talks to the hub through a cloneable
//! [`HubHandle`].

use crate::board::BoardStore;
use crate::checkpoint::Checkpointer;
use crate::error::{SyncError, SyncResult};
use crate::protocol::{ClientEvent, PieceMove, ServerEvent};
use crate::validation::{self, ValidatedMove};
use crate::variant::Variant;
use sharedboard_types::{BoardState, PieceId};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Default number of events queued for one connection before it is dropped.
pub const DEFAULT_CONNECTION_BUFFER: usize = 256;

/// Default number of commands queued for the hub before senders wait.
pub const DEFAULT_COMMAND_BUFFER: usize = 1024;

/// Configuration for the hub.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Layout loaded by a `resetBoard` that names no variant.
    pub default_variant: Variant,
    /// Events queued per connection. A connection that falls this far
    /// behind is disconnected.
    pub connection_buffer: usize,
    /// Commands queued for the hub task.
    pub command_buffer: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            default_variant: Variant::default(),
            connection_buffer: DEFAULT_CONNECTION_BUFFER,
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

/// Identifier of one client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered connection: its id and the stream of events addressed to it.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub events: mpsc::Receiver<ServerEvent>,
}

/// Point-in-time hub statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubStats {
    pub connections: usize,
    pub pieces: usize,
    pub version: u64,
    pub persistence: bool,
}

/// Commands accepted by the hub task.
#[derive(Debug)]
pub enum HubCommand {
    /// Register a new connection.
    Connect { reply: oneshot::Sender<Connection> },
    /// Unregister a connection.
    Disconnect { id: ConnectionId },
    /// An event received from a connection.
    Client { from: ConnectionId, event: ClientEvent },
    /// Read the current board.
    Snapshot { reply: oneshot::Sender<BoardState> },
    /// Read hub statistics.
    Stats { reply: oneshot::Sender<HubStats> },
}

/// Cloneable access point to a running hub.
///
/// The hub stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    async fn send(&self, command: HubCommand) -> SyncResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SyncError::ChannelClosed)
    }

    /// Registers a connection. The first event on it is the full snapshot.
    pub async fn connect(&self) -> SyncResult<Connection> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Connect { reply }).await?;
        rx.await.map_err(|_| SyncError::ChannelClosed)
    }

    /// Unregisters a connection.
    pub async fn disconnect(&self, id: ConnectionId) -> SyncResult<()> {
        self.send(HubCommand::Disconnect { id }).await
    }

    /// Queues a client event, waiting while the hub's queue is full. No
    /// reply is produced.
    pub async fn submit(&self, from: ConnectionId, event: ClientEvent) -> SyncResult<()> {
        self.send(HubCommand::Client { from, event }).await
    }

    /// Returns a copy of the board. Every command submitted earlier through
    /// this handle has been applied by the time it resolves.
    pub async fn snapshot(&self) -> SyncResult<BoardState> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| SyncError::ChannelClosed)
    }

    pub async fn stats(&self) -> SyncResult<HubStats> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Stats { reply }).await?;
        rx.await.map_err(|_| SyncError::ChannelClosed)
    }
}

/// The hub actor.
pub struct BoardHub {
    config: HubConfig,
    board: BoardStore,
    connections: HashMap<ConnectionId, mpsc::Sender<ServerEvent>>,
    checkpointer: Checkpointer,
}

impl BoardHub {
    /// Creates a hub serving `state`.
    pub fn new(state: BoardState, checkpointer: Checkpointer, config: HubConfig) -> Self {
        Self {
            config,
            board: BoardStore::new(state),
            connections: HashMap::new(),
            checkpointer,
        }
    }

    /// Starts the hub on the current Tokio runtime.
    pub fn spawn(self) -> HubHandle {
        let (tx, rx) = mpsc::channel(self.config.command_buffer.max(1));
        tokio::spawn(self.run(rx));
        HubHandle { commands: tx }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<HubCommand>) {
        info!(
            "Board hub started with {} pieces at version {} (persistence {})",
            self.board.len(),
            self.board.version(),
            if self.checkpointer.is_enabled() { "on" } else { "off" }
        );
        while let Some(command) = commands.recv().await {
            self.handle(command);
        }
        debug!("Board hub stopped");
    }

    fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Connect { reply } => self.handle_connect(reply),
            HubCommand::Disconnect { id } => self.handle_disconnect(id),
            HubCommand::Client { from, event } => self.handle_client_event(from, event),
            HubCommand::Snapshot { reply } => {
                let _ = reply.send(self.board.snapshot());
            }
            HubCommand::Stats { reply } => {
                let _ = reply.send(HubStats {
                    connections: self.connections.len(),
                    pieces: self.board.len(),
                    version: self.board.version(),
                    persistence: self.checkpointer.is_enabled(),
                });
            }
        }
    }

    // ── Connection lifecycle ─────────────────────────────────────

    fn handle_connect(&mut self, reply: oneshot::Sender<Connection>) {
        let id = ConnectionId::new();
        // Room for at least the snapshot and the user count.
        let (tx, rx) = mpsc::channel(self.config.connection_buffer.max(2));

        // Queue the snapshot before anyone else can address this connection.
        if tx
            .try_send(ServerEvent::BoardState(self.board.snapshot()))
            .is_err()
        {
            return;
        }
        if reply.send(Connection { id, events: rx }).is_err() {
            debug!("Connection {} abandoned before registration", id);
            return;
        }

        self.connections.insert(id, tx);
        info!("Connection {} joined ({} connected)", id, self.connections.len());
        self.broadcast_user_count();
    }

    fn handle_disconnect(&mut self, id: ConnectionId) {
        if self.connections.remove(&id).is_none() {
            return;
        }
        info!("Connection {} left ({} connected)", id, self.connections.len());
        self.broadcast_user_count();
    }

    // ── Client events ────────────────────────────────────────────

    fn handle_client_event(&mut self, from: ConnectionId, event: ClientEvent) {
        let name = event.name();
        let result = match event {
            ClientEvent::MovePiece(req) => {
                validation::validate_move(&req).map(|mv| self.apply_move(mv))
            }
            ClientEvent::RemovePiece(id) => {
                validation::validate_remove(&id).map(|id| self.apply_remove(&id))
            }
            ClientEvent::CreatePiece(req) => validation::validate_create(&req).map(|new| {
                match self.board.create_piece(new.kind, new.color, new.square) {
                    Ok(piece) => {
                        debug!(
                            "Created {} {} {} at {}",
                            piece.id, piece.color, piece.kind, new.square
                        );
                        self.broadcast(ServerEvent::PieceAdded(piece));
                        true
                    }
                    Err(e) => {
                        debug!("Dropped createPiece from {}: {}", from, e);
                        false
                    }
                }
            }),
            ClientEvent::ResetBoard(req) => {
                validation::validate_reset(&req, self.config.default_variant).map(|variant| {
                    info!("Connection {} reset the board to {}", from, variant);
                    let state = self.board.reset(variant).clone();
                    self.broadcast(ServerEvent::BoardState(state));
                    true
                })
            }
        };

        match result {
            Ok(true) => self.checkpoint(),
            Ok(false) => {}
            Err(rejection) => debug!("Dropped {} from {}: {}", name, from, rejection),
        }
    }

    /// Applies a validated move, capturing whatever else stands on the
    /// target square first. Returns false for an unknown piece.
    fn apply_move(&mut self, mv: ValidatedMove) -> bool {
        let ValidatedMove { piece_id, target } = mv;
        if self.board.piece(piece_id.as_str()).is_none() {
            debug!("Ignored move of unknown piece {}", piece_id);
            return false;
        }

        let captured = self
            .board
            .occupant(target)
            .filter(|occupant| occupant.id != piece_id)
            .map(|occupant| occupant.id.clone());
        if let Some(captured) = captured {
            debug!("{} captures {} on {}", piece_id, captured, target);
            self.board.remove_piece(captured.as_str());
            self.broadcast(ServerEvent::PieceRemoved(captured));
        }

        if let Some(piece) = self.board.move_piece(piece_id.as_str(), target.into()) {
            self.broadcast(ServerEvent::PieceMove(PieceMove {
                piece_id: piece.id,
                new_position: piece.position,
            }));
        }
        true
    }

    fn apply_remove(&mut self, id: &PieceId) -> bool {
        match self.board.remove_piece(id.as_str()) {
            Some(piece) => {
                self.broadcast(ServerEvent::PieceRemoved(piece.id));
                true
            }
            None => {
                debug!("Ignored removal of unknown piece {}", id);
                false
            }
        }
    }

    // ── Fan-out ──────────────────────────────────────────────────

    /// Sends `event` to every connection, the originator included.
    /// Connections whose receiver is gone or whose queue is full are pruned;
    /// dropping the sender closes the connection once it drains.
    fn broadcast(&mut self, event: ServerEvent) {
        let before = self.connections.len();
        self.connections.retain(|id, tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Dropped connection {}: {} events behind", id, tx.max_capacity());
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Pruned closed connection {}", id);
                false
            }
        });
        if self.connections.len() != before {
            self.broadcast_user_count();
        }
    }

    fn broadcast_user_count(&mut self) {
        self.broadcast(ServerEvent::UserCount(self.connections.len()));
    }

    fn checkpoint(&self) {
        // Detached: the handle is dropped and the save runs on its own.
        let _ = self.checkpointer.checkpoint(self.board.snapshot());
    }
}
