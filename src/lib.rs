//! # magnate
//!
//! A hot-seat property-trading board game rule engine for 2-4 players.
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: no rendering, no IO, no timers. The engine
//!    consumes commands, mutates state, and returns events; view and
//!    persistence layers live outside.
//!
//! 2. **Data-driven board**: the cell catalog, rent tables, and card decks
//!    come from an external definition. The engine validates it once and
//!    trusts it afterwards.
//!
//! 3. **Deterministic by seed**: every random draw flows through an
//!    injectable [`DiceSource`]; a seed fully determines a game.
//!
//! ## Architecture
//!
//! - **Single command surface**: [`GameSession`] is the aggregate root.
//!   Commands run to completion; anything needing a human decision comes
//!   back as a [`PendingDecision`] held until the matching command.
//!
//! - **Events over observation**: every command returns the
//!   [`GameEvent`]s it produced and appends them to a persistent history
//!   (`im::Vector`, O(1) snapshots of the log).
//!
//! - **Mirrored ownership**: the board's ownership records are the source
//!   of truth; each player carries a mirror of their holdings so scoring
//!   and per-player views never walk the whole board.
//!
//! ## Modules
//!
//! - `core`: Ids, money, config, dice, error taxonomy
//! - `board`: Cell catalog, board definition, ownership state
//! - `player`: Per-participant record and property mirror
//! - `turn`: Movement, doubles, jail, rotation
//! - `landing`: Destination-cell resolution
//! - `market`: Purchases, auctions, building, mortgages, rent, trades
//! - `scoring`: Net-worth scores and final ranking
//! - `session`: Aggregate root, events, snapshots
//! - `remote`: Country catalog and score-submission shapes

pub mod core;
pub mod board;
pub mod player;
pub mod turn;
pub mod landing;
pub mod market;
pub mod scoring;
pub mod session;
pub mod remote;

// Re-export commonly used types
pub use crate::core::{
    CellId, Money, PlayerId,
    DiceRoll, DiceSource, ScriptedDice, SeededDice,
    GameConfig,
    LoadError, RuleViolation,
};

pub use crate::board::{
    Board, BoardDefinition,
    Card, Cell, CellCategory, CellEffect, ForcedDestination, RentTable,
    OwnershipRecord,
};

pub use crate::player::{OwnedProperty, PlayerRecord};

pub use crate::turn::RollOutcome;

pub use crate::landing::resolve_landing;

pub use crate::market::{BuildingSale, RentCollection};

pub use crate::scoring::ScoreEntry;

pub use crate::session::{
    GameEvent, GameSession, PendingDecision, Phase, Snapshot, TurnPhase,
};

pub use crate::remote::{
    Country, NullSink, Ranking, RankingEntry, ScoreSink, ScoreSubmission,
};
