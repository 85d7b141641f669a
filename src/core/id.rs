//! Identifier newtypes.
//!
//! ## PlayerId
//!
//! Stable per-participant index assigned at setup, 0-based. Doubles as the
//! owner reference in ownership records.
//!
//! ## CellId
//!
//! One of the fixed board positions (0-39 on the classic perimeter).
//! Ownership state is keyed by `CellId` rather than stringified ids so the
//! map can never confuse key types.

use serde::{Deserialize, Serialize};

/// Player identifier, assigned in setup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Board cell identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u8);

impl CellId {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell {}", self.0)
    }
}

/// Money amounts in game currency units.
///
/// Signed: a player's cash may conceptually dip negative only transiently
/// before bankruptcy resolution, and tax deltas arrive negative.
pub type Money = i64;
