//! Game configuration.
//!
//! Fixed amounts for the classic rule set. Defaults mirror the standard
//! board; tests override individual fields to probe edge cases.

use serde::{Deserialize, Serialize};

use super::id::{CellId, Money};

/// Tunable constants for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cash each player starts with.
    pub start_money: Money,

    /// Payout for passing the go cell.
    pub pass_go_bonus: Money,

    /// Cost of building one house.
    pub house_cost: Money,

    /// Cost of upgrading four houses to a hotel.
    pub hotel_cost: Money,

    /// Failed jail rolls before a forced release.
    pub max_jail_turns: u8,

    /// Where players are sent when jailed.
    pub jail_cell: CellId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_money: 1500,
            pass_go_bonus: 200,
            house_cost: 100,
            hotel_cost: 250,
            max_jail_turns: 3,
            jail_cell: CellId::new(10),
        }
    }
}
