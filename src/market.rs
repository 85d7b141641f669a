//! Market engine: buying, auctions, building, mortgages, rent, trades,
//! bankruptcy.
//!
//! Every operation validates its preconditions first and mutates nothing
//! on rejection; the returned [`RuleViolation`] names the rule that
//! failed. Board ownership records are the source of truth; the per-player
//! property mirrors are kept in lockstep by the same mutation.

use crate::board::{Board, RentTable};
use crate::core::{CellId, GameConfig, Money, PlayerId, RuleViolation};
use crate::player::{OwnedProperty, PlayerRecord};

/// Outcome of collecting rent after a landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RentCollection {
    /// Nothing changes hands (mortgaged cell or zero-rent tier).
    NoRent,

    /// Payer covered the rent in full.
    Paid { to: PlayerId, amount: Money },

    /// Payer cannot cover it; a bankruptcy declaration is the only way out.
    Owed { to: PlayerId, amount: Money },
}

/// What a building sale removed and refunded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingSale {
    /// True if a hotel came down, false for a house.
    pub hotel: bool,
    pub refund: Money,
}

fn check_player(players: &[PlayerRecord], id: PlayerId) -> Result<(), RuleViolation> {
    if id.index() < players.len() {
        Ok(())
    } else {
        Err(RuleViolation::UnknownPlayer { player: id })
    }
}

fn solvent(players: &[PlayerRecord], id: PlayerId) -> Result<(), RuleViolation> {
    check_player(players, id)?;
    if players[id.index()].bankrupt {
        Err(RuleViolation::PlayerBankrupt { player: id })
    } else {
        Ok(())
    }
}

/// Buy an unowned cell at list price.
///
/// Returns the price debited.
pub fn buy(
    board: &mut Board,
    players: &mut [PlayerRecord],
    buyer: PlayerId,
    cell_id: CellId,
) -> Result<Money, RuleViolation> {
    let cell = board.cell(cell_id).ok_or(RuleViolation::UnknownCell { cell: cell_id })?;
    let price = cell
        .price
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    acquire(board, players, buyer, cell_id, price)?;
    Ok(price)
}

/// Hand an unowned cell to the auction winner at the winning bid.
///
/// No reserve price: a zero bid is legal if the decision layer allows it.
pub fn settle_auction(
    board: &mut Board,
    players: &mut [PlayerRecord],
    winner: PlayerId,
    cell_id: CellId,
    bid: Money,
) -> Result<(), RuleViolation> {
    if bid < 0 {
        return Err(RuleViolation::InvalidBid { bid });
    }
    acquire(board, players, winner, cell_id, bid)
}

/// Shared purchase path: debit the buyer, set the owner, mirror the entry.
fn acquire(
    board: &mut Board,
    players: &mut [PlayerRecord],
    buyer: PlayerId,
    cell_id: CellId,
    price: Money,
) -> Result<(), RuleViolation> {
    solvent(players, buyer)?;
    let category = board
        .cell(cell_id)
        .ok_or(RuleViolation::UnknownCell { cell: cell_id })?
        .category;
    let record = board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if let Some(owner) = record.owner {
        return Err(RuleViolation::AlreadyOwned { cell: cell_id, owner });
    }

    let player = &mut players[buyer.index()];
    if player.cash < price {
        return Err(RuleViolation::InsufficientFunds {
            player: buyer,
            required: price,
            available: player.cash,
        });
    }

    player.cash -= price;
    player.properties.push(OwnedProperty::new(cell_id, category));
    board
        .ownership_mut(cell_id)
        .expect("checked above")
        .owner = Some(buyer);
    Ok(())
}

/// Check that a player holds every property of a color group.
fn has_monopoly(board: &Board, player: PlayerId, group: &str) -> bool {
    let mut any = false;
    for cell in board.group_cells(group) {
        any = true;
        let owned = board
            .ownership(cell.id)
            .map(|r| r.owner == Some(player))
            .unwrap_or(false);
        if !owned {
            return false;
        }
    }
    any
}

/// Minimum house count across a color group (balanced-building floor).
fn group_min_houses(board: &Board, group: &str) -> u8 {
    board
        .group_cells(group)
        .filter_map(|cell| board.ownership(cell.id))
        .map(|r| r.houses)
        .min()
        .unwrap_or(0)
}

/// Build one house on a monopolized, evenly built property.
///
/// Returns the new house count.
pub fn build_house(
    config: &GameConfig,
    board: &mut Board,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    cell_id: CellId,
) -> Result<u8, RuleViolation> {
    solvent(players, actor)?;
    let cell = board.cell(cell_id).ok_or(RuleViolation::UnknownCell { cell: cell_id })?;
    let group = cell
        .group()
        .ok_or(RuleViolation::NotBuildable { cell: cell_id })?
        .to_owned();

    let record = *board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if record.owner != Some(actor) {
        return Err(RuleViolation::NotOwner { player: actor, cell: cell_id });
    }
    if record.hotel {
        return Err(RuleViolation::HotelPresent { cell: cell_id });
    }
    if record.houses >= 4 {
        return Err(RuleViolation::HousesMaxed { cell: cell_id });
    }
    if !has_monopoly(board, actor, &group) {
        return Err(RuleViolation::MissingMonopoly { player: actor, group });
    }
    let minimum = group_min_houses(board, &group);
    if record.houses != minimum {
        return Err(RuleViolation::UnbalancedBuild {
            cell: cell_id,
            houses: record.houses,
            minimum,
        });
    }

    let player = &mut players[actor.index()];
    if player.cash < config.house_cost {
        return Err(RuleViolation::InsufficientFunds {
            player: actor,
            required: config.house_cost,
            available: player.cash,
        });
    }

    player.cash -= config.house_cost;
    let houses = record.houses + 1;
    board.ownership_mut(cell_id).expect("checked above").houses = houses;
    if let Some(mirror) = player.property_mut(cell_id) {
        mirror.houses = houses;
    }
    Ok(houses)
}

/// Upgrade exactly four houses to a hotel.
pub fn build_hotel(
    config: &GameConfig,
    board: &mut Board,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    cell_id: CellId,
) -> Result<(), RuleViolation> {
    solvent(players, actor)?;
    let cell = board.cell(cell_id).ok_or(RuleViolation::UnknownCell { cell: cell_id })?;
    let group = cell
        .group()
        .ok_or(RuleViolation::NotBuildable { cell: cell_id })?
        .to_owned();

    let record = *board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if record.owner != Some(actor) {
        return Err(RuleViolation::NotOwner { player: actor, cell: cell_id });
    }
    if record.hotel {
        return Err(RuleViolation::HotelPresent { cell: cell_id });
    }
    if record.houses != 4 {
        return Err(RuleViolation::NeedFourHouses {
            cell: cell_id,
            houses: record.houses,
        });
    }
    if !has_monopoly(board, actor, &group) {
        return Err(RuleViolation::MissingMonopoly { player: actor, group });
    }

    let player = &mut players[actor.index()];
    if player.cash < config.hotel_cost {
        return Err(RuleViolation::InsufficientFunds {
            player: actor,
            required: config.hotel_cost,
            available: player.cash,
        });
    }

    player.cash -= config.hotel_cost;
    let record = board.ownership_mut(cell_id).expect("checked above");
    record.houses = 0;
    record.hotel = true;
    if let Some(mirror) = player.property_mut(cell_id) {
        mirror.houses = 0;
        mirror.hotel = true;
    }
    Ok(())
}

/// Sell one building unit: the hotel if present, otherwise one house.
///
/// Refunds half the build cost. No monopoly requirement to sell.
pub fn sell_building(
    config: &GameConfig,
    board: &mut Board,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    cell_id: CellId,
) -> Result<BuildingSale, RuleViolation> {
    solvent(players, actor)?;
    let record = *board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if record.owner != Some(actor) {
        return Err(RuleViolation::NotOwner { player: actor, cell: cell_id });
    }

    let sale = if record.hotel {
        BuildingSale {
            hotel: true,
            refund: config.hotel_cost / 2,
        }
    } else if record.houses > 0 {
        BuildingSale {
            hotel: false,
            refund: config.house_cost / 2,
        }
    } else {
        return Err(RuleViolation::NothingToSell { cell: cell_id });
    };

    let player = &mut players[actor.index()];
    player.cash += sale.refund;
    let record = board.ownership_mut(cell_id).expect("checked above");
    if sale.hotel {
        record.hotel = false;
    } else {
        record.houses -= 1;
    }
    let houses = record.houses;
    let hotel = record.hotel;
    if let Some(mirror) = player.property_mut(cell_id) {
        mirror.houses = houses;
        mirror.hotel = hotel;
    }
    Ok(sale)
}

/// Mortgage an owned cell, crediting its mortgage value.
pub fn mortgage(
    board: &mut Board,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    cell_id: CellId,
) -> Result<Money, RuleViolation> {
    solvent(players, actor)?;
    let value = board
        .cell(cell_id)
        .ok_or(RuleViolation::UnknownCell { cell: cell_id })?
        .mortgage_value
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    let record = *board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if record.owner != Some(actor) {
        return Err(RuleViolation::NotOwner { player: actor, cell: cell_id });
    }
    if record.mortgaged {
        return Err(RuleViolation::AlreadyMortgaged { cell: cell_id });
    }

    let player = &mut players[actor.index()];
    player.cash += value;
    board.ownership_mut(cell_id).expect("checked above").mortgaged = true;
    if let Some(mirror) = player.property_mut(cell_id) {
        mirror.mortgaged = true;
    }
    Ok(value)
}

/// Repayment for lifting a mortgage: the value plus 10% interest,
/// rounded up.
#[must_use]
pub fn unmortgage_cost(mortgage_value: Money) -> Money {
    (mortgage_value * 11 + 9) / 10
}

/// Lift a mortgage, debiting value plus interest.
///
/// Returns the amount debited.
pub fn unmortgage(
    board: &mut Board,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    cell_id: CellId,
) -> Result<Money, RuleViolation> {
    solvent(players, actor)?;
    let value = board
        .cell(cell_id)
        .ok_or(RuleViolation::UnknownCell { cell: cell_id })?
        .mortgage_value
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    let record = *board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if record.owner != Some(actor) {
        return Err(RuleViolation::NotOwner { player: actor, cell: cell_id });
    }
    if !record.mortgaged {
        return Err(RuleViolation::NotMortgaged { cell: cell_id });
    }

    let cost = unmortgage_cost(value);
    let player = &mut players[actor.index()];
    if player.cash < cost {
        return Err(RuleViolation::InsufficientFunds {
            player: actor,
            required: cost,
            available: player.cash,
        });
    }

    player.cash -= cost;
    board.ownership_mut(cell_id).expect("checked above").mortgaged = false;
    if let Some(mirror) = player.property_mut(cell_id) {
        mirror.mortgaged = false;
    }
    Ok(cost)
}

/// Rent owed for landing on an owned cell.
///
/// Mortgaged cells always rent 0. Properties use hotel > houses > base
/// priority; railroads index their table by the owner's total railroad
/// count. Missing table entries rent 0.
#[must_use]
pub fn compute_rent(board: &Board, players: &[PlayerRecord], cell_id: CellId) -> Money {
    let Some(cell) = board.cell(cell_id) else { return 0 };
    let Some(record) = board.ownership(cell_id) else { return 0 };
    let Some(owner) = record.owner else { return 0 };
    if record.mortgaged {
        return 0;
    }

    match &cell.rent {
        Some(RentTable::Railroad(table)) => {
            let count = players
                .get(owner.index())
                .map(PlayerRecord::railroad_count)
                .unwrap_or(0);
            table.get(count).copied().unwrap_or(0)
        }
        Some(RentTable::Property { base, with_house, with_hotel }) => {
            if record.hotel {
                *with_hotel
            } else if record.houses > 0 {
                with_house.get(record.houses as usize - 1).copied().unwrap_or(0)
            } else {
                *base
            }
        }
        None => 0,
    }
}

/// Collect rent from a player who landed on another player's cell.
///
/// Transfers cash if the payer can cover it; otherwise reports the debt so
/// the caller can offer the bankruptcy declaration. Never partially pays.
pub fn collect_rent(
    board: &Board,
    players: &mut [PlayerRecord],
    payer: PlayerId,
    cell_id: CellId,
) -> RentCollection {
    let Some(record) = board.ownership(cell_id) else { return RentCollection::NoRent };
    let Some(owner) = record.owner else { return RentCollection::NoRent };
    if owner == payer {
        return RentCollection::NoRent;
    }

    let amount = compute_rent(board, players, cell_id);
    if amount <= 0 {
        return RentCollection::NoRent;
    }

    if players[payer.index()].cash >= amount {
        players[payer.index()].cash -= amount;
        players[owner.index()].cash += amount;
        RentCollection::Paid { to: owner, amount }
    } else {
        RentCollection::Owed { to: owner, amount }
    }
}

/// Declare the debtor bankrupt and hand their whole estate to the creditor.
///
/// Every property transfers atomically with its building and mortgage
/// state intact; the debtor's mirror empties and their cash is left as-is.
/// Returns the number of properties transferred.
pub fn declare_bankruptcy(
    board: &mut Board,
    players: &mut [PlayerRecord],
    debtor: PlayerId,
    creditor: PlayerId,
) -> Result<usize, RuleViolation> {
    solvent(players, debtor)?;
    check_player(players, creditor)?;
    if debtor == creditor {
        return Err(RuleViolation::SelfTrade { player: debtor });
    }

    players[debtor.index()].bankrupt = true;
    let estate = std::mem::take(&mut players[debtor.index()].properties);
    let transferred = estate.len();
    for entry in estate {
        if let Some(record) = board.ownership_mut(entry.cell) {
            record.owner = Some(creditor);
        }
        players[creditor.index()].properties.push(entry);
    }
    Ok(transferred)
}

/// Bilateral trade: one property from `from` to `to` for `price` cash.
///
/// The property moves with its current building and mortgage state; both
/// mirrors and the ownership record update atomically with the cash.
pub fn trade(
    board: &mut Board,
    players: &mut [PlayerRecord],
    from: PlayerId,
    to: PlayerId,
    cell_id: CellId,
    price: Money,
) -> Result<(), RuleViolation> {
    solvent(players, from)?;
    solvent(players, to)?;
    if from == to {
        return Err(RuleViolation::SelfTrade { player: from });
    }

    let record = *board
        .ownership(cell_id)
        .ok_or(RuleViolation::NotOwnable { cell: cell_id })?;
    if record.owner != Some(from) {
        return Err(RuleViolation::NotOwner { player: from, cell: cell_id });
    }
    if players[to.index()].cash < price {
        return Err(RuleViolation::InsufficientFunds {
            player: to,
            required: price,
            available: players[to.index()].cash,
        });
    }

    let entry = players[from.index()]
        .take_property(cell_id)
        .ok_or(RuleViolation::NotOwner { player: from, cell: cell_id })?;
    players[to.index()].properties.push(entry);
    players[to.index()].cash -= price;
    players[from.index()].cash += price;
    board.ownership_mut(cell_id).expect("checked above").owner = Some(to);
    Ok(())
}
