//! The board snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{Error, Piece, PieceId, Square};

/// The full collection of pieces at one instant.
///
/// `version` counts accepted mutations. It only orders persisted snapshots
/// and is never used for conflict detection between clients. Snapshots
/// written without a version load as version 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Pieces in insertion order.
    pub pieces: Vec<Piece>,
    #[serde(default)]
    pub version: u64,
}

impl BoardState {
    /// Creates a state at version 0.
    #[must_use]
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces, version: 0 }
    }

    /// Number of pieces, on or off the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Looks up a piece by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id.as_str() == id)
    }

    /// Looks up a piece by id for mutation.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id.as_str() == id)
    }

    /// Returns true if a piece with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Returns the piece standing on `square`, if any.
    #[must_use]
    pub fn occupant(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_on(square))
    }

    /// Iterates over pieces that are placed on a square.
    pub fn on_board(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.position.is_on_board())
    }

    /// Checks the structural invariants: ids are non-empty and unique, and
    /// no square holds more than one piece.
    pub fn validate(&self) -> crate::Result<()> {
        let mut ids: HashSet<&PieceId> = HashSet::with_capacity(self.pieces.len());
        let mut squares: HashMap<Square, &PieceId> = HashMap::new();

        for piece in &self.pieces {
            if piece.id.is_empty() {
                return Err(Error::EmptyPieceId);
            }
            if !ids.insert(&piece.id) {
                return Err(Error::DuplicatePieceId(piece.id.clone()));
            }
            if let Some(square) = piece.position.square() {
                if let Some(first) = squares.insert(square, &piece.id) {
                    return Err(Error::SquareConflict {
                        square,
                        first: first.clone(),
                        second: piece.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Serializes the state to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Parses a state from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}
