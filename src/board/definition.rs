//! External board definition.
//!
//! The definition arrives already parsed (fetching it is someone else's
//! job): four directional cell arrays walked bottom → left → top → right,
//! plus the chance and community-chest decks.

use serde::{Deserialize, Serialize};

use super::cell::{Card, Cell};

/// Raw board definition as consumed from the outside world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefinition {
    pub bottom: Vec<Cell>,
    pub left: Vec<Cell>,
    pub top: Vec<Cell>,
    pub right: Vec<Cell>,

    #[serde(default)]
    pub chance: Vec<Card>,

    #[serde(default)]
    pub community_chest: Vec<Card>,
}

impl BoardDefinition {
    /// Flatten the four directional arrays into perimeter order.
    #[must_use]
    pub fn linearize(&self) -> Vec<Cell> {
        self.bottom
            .iter()
            .chain(&self.left)
            .chain(&self.top)
            .chain(&self.right)
            .cloned()
            .collect()
    }
}
