//! Injectable dice and card-draw randomness.
//!
//! The engine never reaches for ambient randomness: every pseudo-random
//! draw goes through a [`DiceSource`] owned by the session. The default
//! [`SeededDice`] wraps ChaCha8 so a seed fully determines a game;
//! [`ScriptedDice`] replays fixed values for tests and replays.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::id::Money;

/// The result of rolling two six-sided dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
}

impl DiceRoll {
    /// Create a roll from two die faces.
    #[must_use]
    pub const fn new(d1: u8, d2: u8) -> Self {
        Self { d1, d2 }
    }

    /// Total movement steps.
    #[must_use]
    pub const fn total(self) -> Money {
        (self.d1 + self.d2) as Money
    }

    /// Both dice show the same value.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.d1 == self.d2
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.d1, self.d2, self.d1 + self.d2)
    }
}

/// Source of dice rolls and uniform deck draws.
pub trait DiceSource {
    /// Roll two dice.
    fn roll(&mut self) -> DiceRoll;

    /// Pick a uniform index into a deck of `len` cards (with replacement).
    ///
    /// `len` is at least 1; callers skip the draw for empty decks.
    fn draw_index(&mut self, len: usize) -> usize;
}

/// Default pseudo-random source, fully determined by its seed.
#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Create a source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DiceSource for SeededDice {
    fn roll(&mut self) -> DiceRoll {
        DiceRoll::new(self.rng.gen_range(1..=6), self.rng.gen_range(1..=6))
    }

    fn draw_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Deterministic source that replays scripted rolls and draws.
///
/// Panics when the script runs dry; exhausting it mid-test is a test bug.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<DiceRoll>,
    draws: VecDeque<usize>,
}

impl ScriptedDice {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a dice roll.
    pub fn push_roll(&mut self, d1: u8, d2: u8) -> &mut Self {
        self.rolls.push_back(DiceRoll::new(d1, d2));
        self
    }

    /// Queue a deck-draw index.
    pub fn push_draw(&mut self, index: usize) -> &mut Self {
        self.draws.push_back(index);
        self
    }

    /// Build a script from `(d1, d2)` pairs.
    #[must_use]
    pub fn from_rolls(rolls: &[(u8, u8)]) -> Self {
        Self {
            rolls: rolls.iter().map(|&(a, b)| DiceRoll::new(a, b)).collect(),
            draws: VecDeque::new(),
        }
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> DiceRoll {
        self.rolls.pop_front().expect("scripted dice exhausted")
    }

    fn draw_index(&mut self, len: usize) -> usize {
        let index = self.draws.pop_front().expect("scripted draws exhausted");
        assert!(index < len, "scripted draw {} out of range for deck of {}", index, len);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_roll_total_and_double() {
        assert_eq!(DiceRoll::new(3, 4).total(), 7);
        assert!(!DiceRoll::new(3, 4).is_double());
        assert!(DiceRoll::new(5, 5).is_double());
        assert_eq!(format!("{}", DiceRoll::new(2, 6)), "2 + 6 = 8");
    }

    #[test]
    fn test_seeded_dice_deterministic() {
        let mut a = SeededDice::new(42);
        let mut b = SeededDice::new(42);

        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_seeded_dice_in_range() {
        let mut dice = SeededDice::new(7);
        for _ in 0..200 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll.d1));
            assert!((1..=6).contains(&roll.d2));
        }
        for _ in 0..50 {
            assert!(dice.draw_index(16) < 16);
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeededDice::new(1);
        let mut b = SeededDice::new(2);

        let seq_a: Vec<_> = (0..20).map(|_| a.roll()).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.roll()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_scripted_dice_replays() {
        let mut dice = ScriptedDice::from_rolls(&[(1, 2), (6, 6)]);
        dice.push_draw(3);

        assert_eq!(dice.roll(), DiceRoll::new(1, 2));
        assert_eq!(dice.roll(), DiceRoll::new(6, 6));
        assert_eq!(dice.draw_index(10), 3);
    }

    #[test]
    #[should_panic(expected = "scripted dice exhausted")]
    fn test_scripted_dice_exhaustion_panics() {
        let mut dice = ScriptedDice::new();
        let _ = dice.roll();
    }
}
