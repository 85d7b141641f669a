//! Turn engine: dice resolution, jail handling, movement.
//!
//! [`resolve_roll`] is the single transition out of the awaiting-roll
//! state. It mutates only the rolling player and reports what happened as
//! a [`RollOutcome`]; landing side effects are the resolver's job and run
//! after the move.
//!
//! ## Rules encoded here
//!
//! - Three consecutive doubles relocate the player to jail with no
//!   movement and end the turn.
//! - In jail, a double releases immediately and the player moves; a
//!   non-double burns one of the allowed jail turns, and burning the last
//!   one releases the player without movement (they advance on their next
//!   roll).
//! - Movement wraps modulo the board size; crossing the start cell pays
//!   the pass-go bonus before the wrap.
//! - A surviving double keeps the turn with the same player.

use crate::core::{CellId, DiceRoll, GameConfig, Money};
use crate::player::PlayerRecord;

/// What a roll did, for the session to translate into events and phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// Third consecutive double: relocated to jail, no movement.
    SentToJail,

    /// Failed to roll out of jail; still inside.
    HeldInJail {
        /// Failed attempts so far.
        jail_turns: u8,
    },

    /// Served the maximum jail turns; released without moving this turn.
    ServedSentence,

    /// Moved along the board.
    Moved {
        from: CellId,
        to: CellId,
        /// Crossed (or landed on) the start cell and collected the bonus.
        passed_go: bool,
        /// Rolled a double: the same player rolls again after resolution.
        play_again: bool,
        /// This move doubled out of jail.
        released: bool,
    },
}

impl RollOutcome {
    /// Whether the turn stays with the same player.
    #[must_use]
    pub fn keeps_turn(self) -> bool {
        matches!(self, RollOutcome::Moved { play_again: true, .. })
    }
}

/// Resolve one dice roll for the current player.
pub fn resolve_roll(
    config: &GameConfig,
    cell_count: usize,
    player: &mut PlayerRecord,
    roll: DiceRoll,
) -> RollOutcome {
    if player.in_jail {
        return resolve_jail_roll(config, cell_count, player, roll);
    }

    if roll.is_double() {
        player.consecutive_doubles += 1;
        if player.consecutive_doubles >= 3 {
            send_to_jail(config, player);
            return RollOutcome::SentToJail;
        }
    } else {
        player.consecutive_doubles = 0;
    }

    let (from, to, passed_go) = advance(config, cell_count, player, roll.total());
    RollOutcome::Moved {
        from,
        to,
        passed_go,
        play_again: roll.is_double(),
        released: false,
    }
}

fn resolve_jail_roll(
    config: &GameConfig,
    cell_count: usize,
    player: &mut PlayerRecord,
    roll: DiceRoll,
) -> RollOutcome {
    if roll.is_double() {
        player.in_jail = false;
        player.jail_turns = 0;
        let (from, to, passed_go) = advance(config, cell_count, player, roll.total());
        return RollOutcome::Moved {
            from,
            to,
            passed_go,
            play_again: false,
            released: true,
        };
    }

    player.jail_turns += 1;
    if player.jail_turns >= config.max_jail_turns {
        player.in_jail = false;
        player.jail_turns = 0;
        RollOutcome::ServedSentence
    } else {
        RollOutcome::HeldInJail {
            jail_turns: player.jail_turns,
        }
    }
}

/// Move a player forward, paying the pass-go bonus on a wrap.
fn advance(
    config: &GameConfig,
    cell_count: usize,
    player: &mut PlayerRecord,
    steps: Money,
) -> (CellId, CellId, bool) {
    let from = player.position;
    let raw = from.index() + steps as usize;
    let passed_go = raw >= cell_count;
    if passed_go {
        player.cash += config.pass_go_bonus;
    }
    let to = CellId::new((raw % cell_count) as u8);
    player.position = to;
    (from, to, passed_go)
}

/// Forced jail transfer: relocate, flag, and clear all counters.
///
/// Used by the three-doubles rule, go-to-jail cells, and jail cards. Never
/// pays pass-go.
pub fn send_to_jail(config: &GameConfig, player: &mut PlayerRecord) {
    player.position = config.jail_cell;
    player.in_jail = true;
    player.jail_turns = 0;
    player.consecutive_doubles = 0;
}

/// Circularly advance the turn index. Bankrupt players are not skipped;
/// their turn is a forced pass (see DESIGN.md).
#[must_use]
pub fn next_player(current: usize, player_count: usize) -> usize {
    (current + 1) % player_count
}
