//! The canonical in-memory board.
//!
//! [`BoardStore`] knows nothing about clients or persistence. Occupancy on
//! move is the caller's concern; creation refuses occupied squares.

use crate::variant::Variant;
use sharedboard_types::{
    BoardState, Color, MonotonicMillis, Piece, PieceId, PieceKind, Position, Square,
};
use thiserror::Error;

/// Errors from board mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {square} is occupied by {occupant}")]
    SquareOccupied { square: Square, occupant: PieceId },
}

/// Owner of the authoritative [`BoardState`].
#[derive(Debug, Clone)]
pub struct BoardStore {
    state: BoardState,
    ids: MonotonicMillis,
}

impl BoardStore {
    /// Wraps an existing state.
    #[must_use]
    pub fn new(state: BoardState) -> Self {
        Self {
            state,
            ids: MonotonicMillis::new(),
        }
    }

    /// Starts from a fresh copy of `variant`.
    #[must_use]
    pub fn from_variant(variant: Variant) -> Self {
        Self::new(variant.board_state())
    }

    /// Borrows the current state.
    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns an owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.state.clone()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    #[must_use]
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.state.find(id)
    }

    #[must_use]
    pub fn occupant(&self, square: Square) -> Option<&Piece> {
        self.state.occupant(square)
    }

    fn bump(&mut self) {
        self.state.version += 1;
    }

    /// Sets the position of a known piece. Unknown ids are ignored.
    pub fn move_piece(&mut self, id: &str, to: Position) -> Option<Piece> {
        let piece = self.state.find_mut(id)?;
        piece.position = to;
        let moved = piece.clone();
        self.bump();
        Some(moved)
    }

    /// Deletes a piece. Unknown ids are ignored.
    pub fn remove_piece(&mut self, id: &str) -> Option<Piece> {
        let index = self.state.pieces.iter().position(|p| p.id.as_str() == id)?;
        let removed = self.state.pieces.remove(index);
        self.bump();
        Some(removed)
    }

    /// Places a new piece on an empty square and returns it.
    pub fn create_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<Piece, BoardError> {
        if let Some(occupant) = self.state.occupant(square) {
            return Err(BoardError::SquareOccupied {
                square,
                occupant: occupant.id.clone(),
            });
        }

        let id = self.next_id(color, kind);
        let piece = Piece::new(id, kind, color, square);
        self.state.pieces.push(piece.clone());
        self.bump();
        Ok(piece)
    }

    fn next_id(&mut self, color: Color, kind: PieceKind) -> PieceId {
        loop {
            let id = PieceId::synthesize(color, kind, self.ids.tick());
            if !self.state.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// Replaces every piece with a fresh copy of `variant`.
    ///
    /// The version keeps counting up so checkpoints stay ordered.
    pub fn reset(&mut self, variant: Variant) -> &BoardState {
        self.state.pieces = variant.pieces();
        self.bump();
        &self.state
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}
