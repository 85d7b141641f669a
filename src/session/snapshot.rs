//! Session persistence snapshot.
//!
//! Captures everything needed to resume a running game, provided the same
//! static board definition is loaded first: the players, whose turn it is,
//! the phase, and the per-cell ownership state. The storage medium is
//! external; the engine only offers serde types plus compact byte helpers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Phase;
use crate::board::OwnershipRecord;
use crate::core::{CellId, LoadError};
use crate::player::PlayerRecord;

/// Serializable state of a session at a command boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<PlayerRecord>,
    pub current: usize,
    pub phase: Phase,
    pub board_state: FxHashMap<CellId, OwnershipRecord>,
}

impl Snapshot {
    /// Encode to compact bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LoadError> {
        bincode::serialize(self).map_err(|e| LoadError::SnapshotCodec {
            reason: e.to_string(),
        })
    }

    /// Decode from bytes produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        bincode::deserialize(bytes).map_err(|e| LoadError::SnapshotCodec {
            reason: e.to_string(),
        })
    }
}
