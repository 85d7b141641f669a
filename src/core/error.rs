//! Error taxonomy.
//!
//! Two distinct failure families:
//!
//! - [`RuleViolation`]: a command hit a gameplay precondition. Nothing was
//!   mutated; the caller is told which rule failed and may pick another
//!   action. Never fatal.
//! - [`LoadError`]: the external board definition or a saved snapshot is
//!   malformed. Surfaced at load time; the session cannot start from bad
//!   data.

use thiserror::Error;

use super::id::{CellId, Money, PlayerId};
use crate::session::Phase;

/// A rejected command: the named precondition failed, no state was mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// The command is only accepted while the game is running.
    #[error("game is not running (phase: {phase:?})")]
    NotRunning {
        /// Phase the session was in.
        phase: Phase,
    },

    /// Bankrupt players are excluded from all further participation.
    #[error("{player} is bankrupt")]
    PlayerBankrupt { player: PlayerId },

    /// The current player already resolved their roll.
    #[error("{player} has already rolled this turn")]
    AlreadyRolled { player: PlayerId },

    /// The turn can only end once the roll is resolved.
    #[error("{player} must roll before ending the turn")]
    RollPending { player: PlayerId },

    /// An owed debt must be paid or answered with bankruptcy first.
    #[error("{player} owes {amount} to {creditor} and must settle or declare bankruptcy")]
    DebtOutstanding {
        player: PlayerId,
        creditor: PlayerId,
        amount: Money,
    },

    /// The command answers a decision that was never offered.
    #[error("no pending decision to answer")]
    NoPendingDecision,

    /// The actor cannot cover the required amount.
    #[error("{player} has {available} but needs {required}")]
    InsufficientFunds {
        player: PlayerId,
        required: Money,
        available: Money,
    },

    /// Auction bids cannot be negative.
    #[error("bid of {bid} is not a valid auction bid")]
    InvalidBid { bid: Money },

    /// The referenced cell id is outside the loaded catalog.
    #[error("{cell} is not on the board")]
    UnknownCell { cell: CellId },

    /// The cell cannot be owned (tax, chance, special, ...).
    #[error("{cell} is not a purchasable cell")]
    NotOwnable { cell: CellId },

    /// The cell already has an owner.
    #[error("{cell} is already owned by {owner}")]
    AlreadyOwned { cell: CellId, owner: PlayerId },

    /// The actor does not own the cell.
    #[error("{player} does not own {cell}")]
    NotOwner { player: PlayerId, cell: CellId },

    /// Buildings only go on color-group properties.
    #[error("{cell} cannot hold buildings")]
    NotBuildable { cell: CellId },

    /// Building requires holding the full color group.
    #[error("{player} does not hold the full {group} group")]
    MissingMonopoly { player: PlayerId, group: String },

    /// Houses must be spread evenly across the group.
    #[error("{cell} has {houses} houses but the group minimum is {minimum}")]
    UnbalancedBuild {
        cell: CellId,
        houses: u8,
        minimum: u8,
    },

    /// A hotel already stands on the cell.
    #[error("{cell} already has a hotel")]
    HotelPresent { cell: CellId },

    /// Four houses is the cap before a hotel.
    #[error("{cell} already has four houses")]
    HousesMaxed { cell: CellId },

    /// A hotel requires exactly four houses first.
    #[error("{cell} has {houses} houses, a hotel requires four")]
    NeedFourHouses { cell: CellId, houses: u8 },

    /// Nothing built on the cell to sell.
    #[error("{cell} has no buildings to sell")]
    NothingToSell { cell: CellId },

    /// The cell is already mortgaged.
    #[error("{cell} is already mortgaged")]
    AlreadyMortgaged { cell: CellId },

    /// The cell is not mortgaged.
    #[error("{cell} is not mortgaged")]
    NotMortgaged { cell: CellId },

    /// Trades need two distinct players.
    #[error("{player} cannot trade with themselves")]
    SelfTrade { player: PlayerId },

    /// The referenced player id is outside the roster.
    #[error("{player} is not part of this game")]
    UnknownPlayer { player: PlayerId },

    /// Setup accepts 2-4 players.
    #[error("cannot start with {count} players (need 2-4)")]
    BadPlayerCount { count: usize },

    /// Players can only join during setup.
    #[error("setup is closed (phase: {phase:?})")]
    SetupClosed {
        /// Phase the session was in.
        phase: Phase,
    },
}

/// The external board definition or a snapshot could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The four directional arrays produced an empty catalog.
    #[error("board definition contains no cells")]
    EmptyBoard,

    /// Two cells share an id.
    #[error("duplicate cell id {cell}")]
    DuplicateCell { cell: CellId },

    /// Cell ids must cover a contiguous 0..n range.
    #[error("cell id {id} is outside the expected range 0..{expected}")]
    CellOutOfRange { id: u8, expected: usize },

    /// An id in the 0..n range has no cell.
    #[error("no cell with id {cell}")]
    MissingCell { cell: CellId },

    /// An ownable cell lacks required market data.
    #[error("{cell} is missing its {field} field")]
    IncompleteCell { cell: CellId, field: &'static str },

    /// A card or cell effect relocates players to a cell off the board.
    #[error("relocation target {cell} is outside the expected range 0..{expected}")]
    RelocationOutOfRange { cell: CellId, expected: usize },

    /// A snapshot references a cell the loaded board does not have.
    #[error("snapshot references unknown {cell}")]
    SnapshotUnknownCell { cell: CellId },

    /// A snapshot's current-player index is outside its roster.
    #[error("snapshot current index {index} exceeds its {players} players")]
    SnapshotBadIndex { index: usize, players: usize },

    /// A snapshot's ownership records and player mirrors disagree.
    #[error("snapshot ownership and player mirror disagree at {cell}")]
    SnapshotMirrorMismatch { cell: CellId },

    /// Snapshot bytes could not be encoded or decoded.
    #[error("snapshot codec failure: {reason}")]
    SnapshotCodec { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages_name_the_rule() {
        let err = RuleViolation::InsufficientFunds {
            player: PlayerId::new(1),
            required: 200,
            available: 150,
        };
        assert_eq!(err.to_string(), "Player 1 has 150 but needs 200");

        let err = RuleViolation::UnbalancedBuild {
            cell: CellId::new(6),
            houses: 2,
            minimum: 1,
        };
        assert_eq!(err.to_string(), "Cell 6 has 2 houses but the group minimum is 1");
    }

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::IncompleteCell {
            cell: CellId::new(5),
            field: "price",
        };
        assert_eq!(err.to_string(), "Cell 5 is missing its price field");
    }
}
