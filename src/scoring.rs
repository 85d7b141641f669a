//! End-of-game scoring.
//!
//! Net worth = cash, plus list price for every un-mortgaged holding, minus
//! list price for every mortgaged one, plus 100 per house and 200 per
//! hotel. Computed once per player at game end; never mutates state.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Money, PlayerId};
use crate::player::PlayerRecord;

/// Value of one house towards the final score.
const HOUSE_SCORE: Money = 100;
/// Value of one hotel towards the final score.
const HOTEL_SCORE: Money = 200;

/// One row of the final standing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub nickname: String,
    pub country_code: String,
    pub score: Money,
}

/// Net worth of a single player.
#[must_use]
pub fn score(board: &Board, player: &PlayerRecord) -> Money {
    let mut total = player.cash;
    for holding in &player.properties {
        let Some(cell) = board.cell(holding.cell) else { continue };
        let price = cell.price.unwrap_or(0);
        total += if holding.mortgaged { -price } else { price };
        total += Money::from(holding.houses) * HOUSE_SCORE;
        if holding.hotel {
            total += HOTEL_SCORE;
        }
    }
    total
}

/// Score every player and rank them, highest first.
#[must_use]
pub fn rank(board: &Board, players: &[PlayerRecord]) -> Vec<ScoreEntry> {
    let mut entries: Vec<ScoreEntry> = players
        .iter()
        .map(|p| ScoreEntry {
            player: p.id,
            nickname: p.nickname.clone(),
            country_code: p.country_code.clone(),
            score: score(board, p),
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}
