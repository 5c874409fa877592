//! Pieces and their fixed catalogs of kinds and colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, PieceId, Position, Square};

/// Every kind of token the board accepts: the six standard figures followed
/// by the fairy and decorative kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    Elephant,
    Giraffe,
    Unicorn,
    Zebra,
    Mann,
    Centaur,
    Commoner,
    Champion,
    Wizard,
    Fool,
    Archbishop,
    Chancellor,
    Amazon,
    Dragon,
    Ship,
}

impl PieceKind {
    /// The complete catalog, standard figures first.
    pub const ALL: [PieceKind; 21] = [
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Pawn,
        Self::Elephant,
        Self::Giraffe,
        Self::Unicorn,
        Self::Zebra,
        Self::Mann,
        Self::Centaur,
        Self::Commoner,
        Self::Champion,
        Self::Wizard,
        Self::Fool,
        Self::Archbishop,
        Self::Chancellor,
        Self::Amazon,
        Self::Dragon,
        Self::Ship,
    ];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::King => "king",
            Self::Queen => "queen",
            Self::Rook => "rook",
            Self::Bishop => "bishop",
            Self::Knight => "knight",
            Self::Pawn => "pawn",
            Self::Elephant => "elephant",
            Self::Giraffe => "giraffe",
            Self::Unicorn => "unicorn",
            Self::Zebra => "zebra",
            Self::Mann => "mann",
            Self::Centaur => "centaur",
            Self::Commoner => "commoner",
            Self::Champion => "champion",
            Self::Wizard => "wizard",
            Self::Fool => "fool",
            Self::Archbishop => "archbishop",
            Self::Chancellor => "chancellor",
            Self::Amazon => "amazon",
            Self::Dragon => "dragon",
            Self::Ship => "ship",
        }
    }

    /// First letter of the wire name, used when synthesizing ids.
    #[must_use]
    pub const fn initial(&self) -> char {
        self.as_str().as_bytes()[0] as char
    }

    /// Returns true for kinds outside the six standard figures.
    #[must_use]
    pub const fn is_fairy(&self) -> bool {
        !matches!(
            self,
            Self::King | Self::Queen | Self::Rook | Self::Bishop | Self::Knight | Self::Pawn
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownPieceKind(s.to_string()))
    }
}

/// Side or group a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
    /// Neutral tag for decorative pieces.
    Special,
}

impl Color {
    pub const ALL: [Color; 3] = [Self::White, Self::Black, Self::Special];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Special => "special",
        }
    }

    #[must_use]
    pub const fn initial(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
            Self::Special => 's',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

/// A token on (or next to) the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Immutable handle of the piece.
    pub id: PieceId,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
}

impl Piece {
    /// Creates a piece.
    #[must_use]
    pub fn new(
        id: impl Into<PieceId>,
        kind: PieceKind,
        color: Color,
        position: impl Into<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            color,
            position: position.into(),
        }
    }

    /// Returns true if the piece stands on `square`.
    #[must_use]
    pub fn is_on(&self, square: Square) -> bool {
        self.position == Position::Square(square)
    }
}
