//! Static cell catalog types.
//!
//! These mirror the external board definition wire format: cells arrive in
//! four directional arrays, each `{ id, type, name, color?, price?,
//! mortgage?, rent?, action? }`. Property rent is an object with base /
//! per-house / hotel tiers; railroad rent is a plain array indexed by how
//! many railroads the owner holds. Cells never change after load.

use serde::{Deserialize, Serialize};

use crate::core::{CellId, Money};

/// What kind of cell this is; drives landing dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellCategory {
    Property,
    Railroad,
    Tax,
    Chance,
    CommunityChest,
    Special,
}

/// Destination of a forced relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedDestination {
    Jail,
}

/// Optional effect attached to a cell or drawn card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEffect {
    /// Signed cash delta applied to the affected player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<Money>,

    /// Forced transfer (only jail exists in the classic set).
    #[serde(default, rename = "goTo", skip_serializing_if = "Option::is_none")]
    pub go_to: Option<ForcedDestination>,

    /// Forced relocation to a specific cell, without a pass-go payout.
    #[serde(default, rename = "moveTo", skip_serializing_if = "Option::is_none")]
    pub move_to: Option<CellId>,
}

/// Rent schedule for an ownable cell.
///
/// Untagged to match the wire format: railroads serialize as a bare array,
/// properties as an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RentTable {
    /// Indexed by the owner's total railroad count; missing entries rent 0.
    Railroad(Vec<Money>),

    /// Tiered property rent: hotel > houses > base.
    Property {
        base: Money,
        #[serde(rename = "withHouse")]
        with_house: Vec<Money>,
        #[serde(rename = "withHotel")]
        with_hotel: Money,
    },
}

/// One immutable board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,

    #[serde(rename = "type")]
    pub category: CellCategory,

    pub name: String,

    /// Color group, property cells only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// List price, ownable cells only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,

    /// Cash credited when the owner mortgages the cell.
    #[serde(default, rename = "mortgage", skip_serializing_if = "Option::is_none")]
    pub mortgage_value: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<RentTable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CellEffect>,
}

impl Cell {
    /// Property and railroad cells can be owned; everything else cannot.
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        matches!(self.category, CellCategory::Property | CellCategory::Railroad)
    }

    /// Color group for monopoly checks, property cells only.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        match self.category {
            CellCategory::Property => self.color.as_deref(),
            _ => None,
        }
    }
}

/// A chance or community-chest card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CellEffect>,
}
