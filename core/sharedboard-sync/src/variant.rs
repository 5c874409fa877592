//! Named starting layouts.
//!
//! Layouts are generated on every call, so the caller always owns a fresh
//! copy and nothing can mutate a shared template.

use serde::{Deserialize, Serialize};
use sharedboard_types::{BoardState, Color, Piece, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// Back-rank order from the a-file, with the id suffix of each piece.
const BACK_RANK: [(PieceKind, &str); 8] = [
    (PieceKind::Rook, "r1"),
    (PieceKind::Knight, "n1"),
    (PieceKind::Bishop, "b1"),
    (PieceKind::Queen, "q"),
    (PieceKind::King, "k"),
    (PieceKind::Bishop, "b2"),
    (PieceKind::Knight, "n2"),
    (PieceKind::Rook, "r2"),
];

/// Extra horde pawns beyond the first four ranks (files b, c, f, g).
const HORDE_FIFTH_RANK_FILES: [u8; 4] = [1, 2, 5, 6];

/// A named starting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// The regular 32-piece chess setup.
    #[default]
    Standard,
    /// Black's standard army against 36 white pawns.
    Horde,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Self::Standard, Self::Horde];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Horde => "horde",
        }
    }

    /// Looks a variant up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Builds the layout's pieces.
    #[must_use]
    pub fn pieces(&self) -> Vec<Piece> {
        match self {
            Self::Standard => {
                let mut pieces = army(Color::Black);
                pieces.extend(army(Color::White));
                pieces
            }
            Self::Horde => {
                let mut pieces = army(Color::Black);
                pieces.extend(horde());
                pieces
            }
        }
    }

    /// Builds a fresh board at version 0.
    #[must_use]
    pub fn board_state(&self) -> BoardState {
        BoardState::new(self.pieces())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown variant: {s}"))
    }
}

fn rank_squares(rank: u8) -> impl Iterator<Item = Square> {
    Square::all().filter(move |sq| sq.rank() == rank)
}

/// Back rank and pawns for one side, back rank first.
fn army(color: Color) -> Vec<Piece> {
    let (back, pawns) = match color {
        Color::White => (0, 1),
        _ => (7, 6),
    };
    let c = color.initial();

    let officers = BACK_RANK
        .iter()
        .zip(rank_squares(back))
        .map(|((kind, suffix), sq)| Piece::new(format!("{c}{suffix}"), *kind, color, sq));
    let pawns = rank_squares(pawns)
        .enumerate()
        .map(|(i, sq)| Piece::new(format!("{c}p{}", i + 1), PieceKind::Pawn, color, sq));

    officers.chain(pawns).collect()
}

/// White's 36 pawns: ranks one to four plus four on the fifth rank.
fn horde() -> Vec<Piece> {
    (0..4)
        .flat_map(rank_squares)
        .chain(rank_squares(4).filter(|sq| HORDE_FIFTH_RANK_FILES.contains(&sq.file())))
        .enumerate()
        .map(|(i, sq)| Piece::new(format!("wp{}", i + 1), PieceKind::Pawn, Color::White, sq))
        .collect()
}
