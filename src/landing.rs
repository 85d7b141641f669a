//! Landing resolution: what happens on the destination cell.
//!
//! Runs synchronously after every move and dispatches on the cell
//! category. Direct effects (taxes, payouts, card draws, jail transfers)
//! apply immediately; anything that needs a human decision comes back as a
//! [`PendingDecision`] for the session to hold until the matching command
//! arrives.

use crate::board::{Board, Card, CellCategory, CellEffect, ForcedDestination};
use crate::core::{DiceSource, GameConfig, PlayerId};
use crate::market::{self, RentCollection};
use crate::player::PlayerRecord;
use crate::session::{GameEvent, PendingDecision};
use crate::turn;

/// Resolve the effects of the actor's current position.
///
/// Appends events describing what happened and returns the decision the
/// acting player now faces, if any.
pub fn resolve_landing(
    config: &GameConfig,
    board: &mut Board,
    players: &mut [PlayerRecord],
    dice: &mut dyn DiceSource,
    actor: PlayerId,
    events: &mut Vec<GameEvent>,
) -> Option<PendingDecision> {
    let cell_id = players[actor.index()].position;
    let cell = board.cell_at(cell_id);
    events.push(GameEvent::Landed {
        player: actor,
        cell: cell_id,
        name: cell.name.clone(),
    });

    match cell.category {
        CellCategory::Special => {
            let effect = cell.action.clone();
            apply_special(config, players, actor, effect.as_ref(), events);
            None
        }
        CellCategory::Tax => {
            let delta = cell.action.as_ref().and_then(|a| a.money).unwrap_or(0);
            players[actor.index()].cash += delta;
            events.push(GameEvent::TaxApplied { player: actor, amount: delta });
            None
        }
        CellCategory::Chance | CellCategory::CommunityChest => {
            let deck_kind = cell.category;
            draw_card(config, board, players, dice, actor, deck_kind, events);
            None
        }
        CellCategory::Property | CellCategory::Railroad => {
            resolve_ownable(board, players, actor, events)
        }
    }
}

fn apply_special(
    config: &GameConfig,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    effect: Option<&CellEffect>,
    events: &mut Vec<GameEvent>,
) {
    let Some(effect) = effect else { return };

    if effect.go_to == Some(ForcedDestination::Jail) {
        turn::send_to_jail(config, &mut players[actor.index()]);
        events.push(GameEvent::SentToJail { player: actor });
        return;
    }
    if let Some(amount) = effect.money {
        if amount != 0 {
            players[actor.index()].cash += amount;
            events.push(GameEvent::Payout { player: actor, amount });
        }
    }
}

/// Draw one card uniformly, with replacement; no deck exhaustion exists.
fn draw_card(
    config: &GameConfig,
    board: &Board,
    players: &mut [PlayerRecord],
    dice: &mut dyn DiceSource,
    actor: PlayerId,
    deck_kind: CellCategory,
    events: &mut Vec<GameEvent>,
) {
    let deck: &[Card] = match deck_kind {
        CellCategory::Chance => board.chance_deck(),
        _ => board.community_chest_deck(),
    };
    if deck.is_empty() {
        return;
    }

    let card = &deck[dice.draw_index(deck.len())];
    let action = card.action.clone().unwrap_or_default();
    let amount = action.money.unwrap_or(0);

    let player = &mut players[actor.index()];
    player.cash += amount;
    events.push(GameEvent::CardDrawn {
        player: actor,
        deck: deck_kind,
        description: card.description.clone(),
        amount,
    });

    if action.go_to == Some(ForcedDestination::Jail) {
        turn::send_to_jail(config, player);
        events.push(GameEvent::SentToJail { player: actor });
    } else if let Some(destination) = action.move_to {
        // Card relocations place the token directly; no pass-go payout.
        player.position = destination;
        events.push(GameEvent::Relocated { player: actor, to: destination });
    }
}

fn resolve_ownable(
    board: &mut Board,
    players: &mut [PlayerRecord],
    actor: PlayerId,
    events: &mut Vec<GameEvent>,
) -> Option<PendingDecision> {
    let cell_id = players[actor.index()].position;
    let record = board.ownership(cell_id).copied()?;

    match record.owner {
        None => {
            // Buy at list price, start an auction, or decline.
            events.push(GameEvent::PurchaseOffered { cell: cell_id });
            Some(PendingDecision::PurchaseOffer { cell: cell_id })
        }
        Some(owner) if owner == actor => {
            // Owner actions (build, mortgage, trade, ...) are ordinary
            // commands; nothing to resolve here.
            None
        }
        Some(owner) => {
            if record.mortgaged {
                events.push(GameEvent::MortgagedNoRent { cell: cell_id });
                return None;
            }
            match market::collect_rent(board, players, actor, cell_id) {
                RentCollection::NoRent => None,
                RentCollection::Paid { to, amount } => {
                    events.push(GameEvent::RentPaid {
                        payer: actor,
                        owner: to,
                        cell: cell_id,
                        amount,
                    });
                    None
                }
                RentCollection::Owed { to, amount } => {
                    debug_assert_eq!(to, owner);
                    events.push(GameEvent::RentDue {
                        payer: actor,
                        owner: to,
                        cell: cell_id,
                        amount,
                    });
                    Some(PendingDecision::DebtOwed {
                        cell: cell_id,
                        creditor: to,
                        amount,
                    })
                }
            }
        }
    }
}
