//! Request validation.
//!
//! Pure functions: each turns a raw client payload into typed values or a
//! [`Rejection`]. Nothing here touches the board, so a rejected request can
//! never leave a partial change behind. Rejections are not reported to the
//! sender; the hub only logs them.

use crate::protocol::{CreatePieceRequest, MovePieceRequest, ResetRequest};
use crate::variant::Variant;
use sharedboard_types::{Color, PieceId, PieceKind, Square};
use thiserror::Error;

/// Why a request was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("position {0:?} is not a board square")]
    InvalidPosition(String),

    #[error("unknown piece type {0:?}")]
    UnknownKind(String),

    #[error("unknown color {0:?}")]
    UnknownColor(String),

    #[error("empty piece id")]
    EmptyPieceId,

    #[error("unknown variant {0:?}")]
    UnknownVariant(String),
}

/// A move that passed validation. The piece may still be unknown to the
/// board; that is decided when the move is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    pub piece_id: PieceId,
    pub target: Square,
}

/// A creation request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPiece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

/// Returns true if `s` matches `^[a-h][1-8]$`.
#[must_use]
pub fn is_board_square(s: &str) -> bool {
    Square::parse(s).is_ok()
}

fn square(s: &str) -> Result<Square, Rejection> {
    Square::parse(s).map_err(|_| Rejection::InvalidPosition(s.to_string()))
}

fn piece_id(s: &str) -> Result<PieceId, Rejection> {
    if s.is_empty() {
        Err(Rejection::EmptyPieceId)
    } else {
        Ok(PieceId::new(s))
    }
}

/// Checks a `movePiece` request. `offboard` is not a valid target.
pub fn validate_move(req: &MovePieceRequest) -> Result<ValidatedMove, Rejection> {
    Ok(ValidatedMove {
        piece_id: piece_id(&req.piece_id)?,
        target: square(&req.new_position)?,
    })
}

/// Checks a `removePiece` request.
pub fn validate_remove(id: &str) -> Result<PieceId, Rejection> {
    piece_id(id)
}

/// Checks a `createPiece` request against the kind and color catalogs.
/// New pieces must be placed on a square.
pub fn validate_create(req: &CreatePieceRequest) -> Result<NewPiece, Rejection> {
    let kind = req
        .kind
        .parse::<PieceKind>()
        .map_err(|_| Rejection::UnknownKind(req.kind.clone()))?;
    let color = req
        .color
        .parse::<Color>()
        .map_err(|_| Rejection::UnknownColor(req.color.clone()))?;
    Ok(NewPiece {
        kind,
        color,
        square: square(&req.position)?,
    })
}

/// Resolves the layout a `resetBoard` request asks for.
pub fn validate_reset(req: &ResetRequest, default: Variant) -> Result<Variant, Rejection> {
    match req.variant.as_deref() {
        None => Ok(default),
        Some(name) => {
            Variant::from_name(name).ok_or_else(|| Rejection::UnknownVariant(name.to_string()))
        }
    }
}
