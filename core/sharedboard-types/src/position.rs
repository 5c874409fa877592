//! Grid coordinates for the 8×8 board.
//!
//! A [`Square`] is always a valid `a1`..`h8` coordinate; the only other
//! [`Position`] a piece may hold is the `offboard` sentinel. Both types
//! serialize as plain strings and refuse anything else on the way in, so an
//! invalid position can never reach the board.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Wire value of [`Position::Offboard`].
pub const OFFBOARD: &str = "offboard";

/// A square on the board.
///
/// `file` and `rank` are zero-based (`a1` is `(0, 0)`, `h8` is `(7, 7)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from zero-based file and rank, if both are in range.
    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Parses algebraic notation. Accepts exactly `^[a-h][1-8]$`.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Self {
                file: f - b'a',
                rank: r - b'1',
            }),
            _ => Err(Error::InvalidPosition(s.to_string())),
        }
    }

    /// Zero-based file index.
    #[must_use]
    pub const fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// File letter, `'a'..='h'`.
    #[must_use]
    pub const fn file_char(&self) -> char {
        (b'a' + self.file) as char
    }

    /// Rank digit, `'1'..='8'`.
    #[must_use]
    pub const fn rank_char(&self) -> char {
        (b'1' + self.rank) as char
    }

    /// All 64 squares, rank-major from `a1`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Square {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// Where a piece currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Placed on a square.
    Square(Square),
    /// Known to the board but not placed.
    Offboard,
}

impl Position {
    /// Parses a square or the `offboard` sentinel.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s == OFFBOARD {
            Ok(Self::Offboard)
        } else {
            Square::parse(s).map(Self::Square)
        }
    }

    /// Returns the square, if the position is on the board.
    #[must_use]
    pub const fn square(&self) -> Option<Square> {
        match self {
            Self::Square(sq) => Some(*sq),
            Self::Offboard => None,
        }
    }

    /// Returns true if the position is a square.
    #[must_use]
    pub const fn is_on_board(&self) -> bool {
        matches!(self, Self::Square(_))
    }
}

impl From<Square> for Position {
    fn from(square: Square) -> Self {
        Self::Square(square)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square(sq) => sq.fmt(f),
            Self::Offboard => f.write_str(OFFBOARD),
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Position {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}
