//! Core types: ids, money, configuration, dice, errors.

pub mod config;
pub mod dice;
pub mod error;
pub mod id;

pub use config::GameConfig;
pub use dice::{DiceRoll, DiceSource, ScriptedDice, SeededDice};
pub use error::{LoadError, RuleViolation};
pub use id::{CellId, Money, PlayerId};
