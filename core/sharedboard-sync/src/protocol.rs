//! Wire protocol between clients and the hub.
//!
//! Every message is a JSON object `{"event": <name>, "data": <payload>}`.
//! Client payloads carry raw strings; typing them is the job of
//! [`crate::validation`], so a request naming an unknown piece type still
//! decodes and is then rejected by the gate rather than by the parser.

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sharedboard_types::{BoardState, Piece, PieceId, Position};

/// `movePiece` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePieceRequest {
    pub piece_id: String,
    pub new_position: String,
}

/// `createPiece` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePieceRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub position: String,
}

/// `resetBoard` payload. Clients may omit it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    /// Layout to load; the hub's default variant when absent.
    #[serde(default)]
    pub variant: Option<String>,
}

/// An event sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    MovePiece(MovePieceRequest),
    RemovePiece(String),
    CreatePiece(CreatePieceRequest),
    ResetBoard(ResetRequest),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

impl ClientEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MovePiece(_) => "movePiece",
            Self::RemovePiece(_) => "removePiece",
            Self::CreatePiece(_) => "createPiece",
            Self::ResetBoard(_) => "resetBoard",
        }
    }

    /// Decodes a text frame.
    pub fn decode(text: &str) -> SyncResult<Self> {
        let Envelope { event, data } = serde_json::from_str(text)?;
        let decoded = match event.as_str() {
            "movePiece" => Self::MovePiece(serde_json::from_value(data)?),
            "removePiece" => Self::RemovePiece(serde_json::from_value(data)?),
            "createPiece" => Self::CreatePiece(serde_json::from_value(data)?),
            "resetBoard" if data.is_null() => Self::ResetBoard(ResetRequest::default()),
            "resetBoard" => Self::ResetBoard(serde_json::from_value(data)?),
            other => return Err(SyncError::Protocol(format!("unknown event: {other}"))),
        };
        Ok(decoded)
    }

    /// Encodes the event as a text frame.
    pub fn encode(&self) -> SyncResult<String> {
        let data = match self {
            Self::MovePiece(req) => serde_json::to_value(req)?,
            Self::RemovePiece(id) => Value::String(id.clone()),
            Self::CreatePiece(req) => serde_json::to_value(req)?,
            Self::ResetBoard(req) if req.variant.is_none() => Value::Null,
            Self::ResetBoard(req) => serde_json::to_value(req)?,
        };
        Ok(json!({ "event": self.name(), "data": data }).to_string())
    }
}

/// `pieceMove` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceMove {
    pub piece_id: PieceId,
    pub new_position: Position,
}

/// An event sent by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full snapshot; replaces the client's local state.
    BoardState(BoardState),
    /// Number of connected clients.
    UserCount(usize),
    PieceMove(PieceMove),
    PieceRemoved(PieceId),
    PieceAdded(Piece),
}

impl ServerEvent {
    /// Encodes the event as a text frame.
    pub fn encode(&self) -> SyncResult<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Decodes a text frame.
    pub fn decode(text: &str) -> SyncResult<Self> {
        serde_json::from_str(text).map_err(Into::into)
    }
}
