//! Per-participant player record.
//!
//! A passive record: every field is mutated by the turn, landing, and
//! market engines, never by the record itself. The `properties` list
//! mirrors the board's ownership records (same houses/hotel/mortgage
//! state) so per-player views and scoring never walk the whole board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::CellCategory;
use crate::core::{CellId, GameConfig, Money, PlayerId};

/// One entry of a player's property mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedProperty {
    pub cell: CellId,
    pub category: CellCategory,
    pub houses: u8,
    pub hotel: bool,
    pub mortgaged: bool,
}

impl OwnedProperty {
    /// A freshly purchased, unimproved property.
    #[must_use]
    pub fn new(cell: CellId, category: CellCategory) -> Self {
        Self {
            cell,
            category,
            houses: 0,
            hotel: false,
            mortgaged: false,
        }
    }
}

/// Mutable state of one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub nickname: String,
    pub country_code: String,
    pub color: String,

    pub position: CellId,
    pub cash: Money,

    pub in_jail: bool,
    pub jail_turns: u8,
    pub consecutive_doubles: u8,

    /// Owned cells in acquisition order, mirroring board ownership.
    pub properties: SmallVec<[OwnedProperty; 8]>,

    /// Terminal: once set the player holds nothing and is skipped forever.
    pub bankrupt: bool,
}

impl PlayerRecord {
    /// Create a player at the start cell with the configured cash.
    #[must_use]
    pub fn new(
        id: PlayerId,
        nickname: impl Into<String>,
        country_code: impl Into<String>,
        color: impl Into<String>,
        config: &GameConfig,
    ) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            country_code: country_code.into(),
            color: color.into(),
            position: CellId::new(0),
            cash: config.start_money,
            in_jail: false,
            jail_turns: 0,
            consecutive_doubles: 0,
            properties: SmallVec::new(),
            bankrupt: false,
        }
    }

    /// Whether the player owns the given cell.
    #[must_use]
    pub fn owns(&self, cell: CellId) -> bool {
        self.properties.iter().any(|p| p.cell == cell)
    }

    /// The player's mirror entry for a cell.
    #[must_use]
    pub fn property(&self, cell: CellId) -> Option<&OwnedProperty> {
        self.properties.iter().find(|p| p.cell == cell)
    }

    /// Mutable mirror entry for a cell.
    pub fn property_mut(&mut self, cell: CellId) -> Option<&mut OwnedProperty> {
        self.properties.iter_mut().find(|p| p.cell == cell)
    }

    /// Remove and return the mirror entry for a cell.
    pub fn take_property(&mut self, cell: CellId) -> Option<OwnedProperty> {
        let index = self.properties.iter().position(|p| p.cell == cell)?;
        Some(self.properties.remove(index))
    }

    /// How many railroads the player holds (drives railroad rent tiers).
    #[must_use]
    pub fn railroad_count(&self) -> usize {
        self.properties
            .iter()
            .filter(|p| p.category == CellCategory::Railroad)
            .count()
    }
}
