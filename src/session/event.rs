//! Game events.
//!
//! Every command returns the events it produced and appends them to the
//! session history. Rule logic never draws anything; the view layer
//! renders from these values and from post-command snapshots.

use serde::{Deserialize, Serialize};

use crate::board::CellCategory;
use crate::core::{CellId, Money, PlayerId};

/// Something observable that happened inside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Setup finished; play begins.
    GameStarted { players: usize },

    /// The current player rolled the dice.
    Rolled { player: PlayerId, d1: u8, d2: u8 },

    /// Token advanced along the board.
    Moved { player: PlayerId, from: CellId, to: CellId },

    /// Crossed the start cell and collected the bonus.
    PassedGo { player: PlayerId, amount: Money },

    /// Rolled a double and keeps the turn.
    PlayAgain { player: PlayerId },

    /// Forced jail transfer (three doubles, cell, or card).
    SentToJail { player: PlayerId },

    /// Failed to roll out of jail.
    StayedInJail { player: PlayerId, jail_turns: u8 },

    /// Out of jail; `moved` is false for a served sentence.
    ReleasedFromJail { player: PlayerId, moved: bool },

    /// Landed on a cell.
    Landed { player: PlayerId, cell: CellId, name: String },

    /// Fixed payout from a special cell.
    Payout { player: PlayerId, amount: Money },

    /// Signed tax delta applied.
    TaxApplied { player: PlayerId, amount: Money },

    /// Drew a chance or community-chest card.
    CardDrawn {
        player: PlayerId,
        deck: CellCategory,
        description: String,
        amount: Money,
    },

    /// Card relocation, placed directly without a pass-go payout.
    Relocated { player: PlayerId, to: CellId },

    /// Unowned cell: buy, auction, or decline.
    PurchaseOffered { cell: CellId },

    /// Open purchase offer was declined (explicitly or by moving on).
    PurchaseDeclined { cell: CellId },

    /// Bought at list price.
    Purchased { player: PlayerId, cell: CellId, price: Money },

    /// Auction settled at the winning bid.
    AuctionWon { player: PlayerId, cell: CellId, bid: Money },

    /// One house built.
    HouseBuilt { player: PlayerId, cell: CellId, houses: u8 },

    /// Four houses upgraded to a hotel.
    HotelBuilt { player: PlayerId, cell: CellId },

    /// One building unit sold back for half cost.
    BuildingSold {
        player: PlayerId,
        cell: CellId,
        hotel: bool,
        refund: Money,
    },

    /// Property mortgaged for its mortgage value.
    Mortgaged { player: PlayerId, cell: CellId, value: Money },

    /// Mortgage lifted at value plus interest.
    Unmortgaged { player: PlayerId, cell: CellId, cost: Money },

    /// Rent transferred in full.
    RentPaid {
        payer: PlayerId,
        owner: PlayerId,
        cell: CellId,
        amount: Money,
    },

    /// Rent owed but not coverable; bankruptcy is on the table.
    RentDue {
        payer: PlayerId,
        owner: PlayerId,
        cell: CellId,
        amount: Money,
    },

    /// Landed on a mortgaged cell; no rent changes hands.
    MortgagedNoRent { cell: CellId },

    /// One property traded for cash.
    Traded {
        from: PlayerId,
        to: PlayerId,
        cell: CellId,
        price: Money,
    },

    /// Debtor went bankrupt; whole estate moved to the creditor.
    Bankrupted {
        player: PlayerId,
        creditor: PlayerId,
        transferred: usize,
    },

    /// Turn passed to the next player in rotation.
    TurnEnded { next: PlayerId },

    /// Session finalized; scores are settled.
    GameOver,
}
