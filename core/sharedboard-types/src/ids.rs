//! Identifier types for board pieces.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::{Color, PieceKind};

/// Opaque handle of a piece.
///
/// Ids from the built-in layouts are short mnemonics (`wp1`, `bk`); ids of
/// pieces created at runtime are synthesized from color, kind and creation
/// time (see [`PieceId::synthesize`]). The string is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    /// Wraps an existing id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the id of a freshly created piece, e.g. `wn1718000000000`.
    #[must_use]
    pub fn synthesize(color: Color, kind: PieceKind, millis: u64) -> Self {
        Self(format!("{}{}{}", color.initial(), kind.initial(), millis))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty id, which no piece may carry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PieceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PieceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for PieceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
