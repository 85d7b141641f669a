//! Game session: the aggregate root and sole command surface.
//!
//! One logical thread of control: each command runs to completion before
//! the next is accepted, and every mutation is funneled through the
//! session so outside layers (render, persist, network) only ever observe
//! consistent, fully-resolved state between commands.
//!
//! Commands return the [`GameEvent`]s they produced and append them to a
//! persistent history; rejected commands return a [`RuleViolation`] naming
//! the rule that failed and mutate nothing.

pub mod event;
pub mod snapshot;

pub use event::GameEvent;
pub use snapshot::Snapshot;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardDefinition};
use crate::core::{
    CellId, DiceSource, GameConfig, LoadError, Money, PlayerId, RuleViolation, SeededDice,
};
use crate::landing;
use crate::market;
use crate::player::PlayerRecord;
use crate::remote::{Country, NullSink, ScoreSink, ScoreSubmission};
use crate::scoring::{self, ScoreEntry};
use crate::turn::{self, RollOutcome};

/// Session lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Running,
    Over,
}

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting on the dice (also after a double kept the turn).
    AwaitingRoll,
    /// Roll resolved; only `end_turn` moves things forward.
    TurnComplete,
}

/// A decision the acting player must answer before the game moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingDecision {
    /// Unowned cell landed on: buy at list price, auction it, or decline.
    PurchaseOffer { cell: CellId },

    /// Rent the player cannot cover; pay in full is off the table, so the
    /// only exit is declaring bankruptcy to the creditor.
    DebtOwed {
        cell: CellId,
        creditor: PlayerId,
        amount: Money,
    },
}

/// Aggregate root composing the board, players, turn machine, and market.
pub struct GameSession {
    config: GameConfig,
    board: Board,
    countries: Vec<Country>,
    players: Vec<PlayerRecord>,
    current: usize,
    phase: Phase,
    turn_phase: TurnPhase,
    pending: Option<PendingDecision>,
    dice: Box<dyn DiceSource>,
    history: Vector<GameEvent>,
}

impl GameSession {
    /// Create a session in the setup phase from an external board
    /// definition.
    pub fn new(
        definition: &BoardDefinition,
        countries: Vec<Country>,
        config: GameConfig,
        dice: Box<dyn DiceSource>,
    ) -> Result<Self, LoadError> {
        let board = Board::from_definition(definition)?;
        if config.jail_cell.index() >= board.cell_count() {
            return Err(LoadError::RelocationOutOfRange {
                cell: config.jail_cell,
                expected: board.cell_count(),
            });
        }
        Ok(Self {
            config,
            board,
            countries,
            players: Vec::new(),
            current: 0,
            phase: Phase::Setup,
            turn_phase: TurnPhase::AwaitingRoll,
            pending: None,
            dice,
            history: Vector::new(),
        })
    }

    /// Convenience constructor with default config and seeded dice.
    pub fn with_seed(
        definition: &BoardDefinition,
        countries: Vec<Country>,
        seed: u64,
    ) -> Result<Self, LoadError> {
        Self::new(
            definition,
            countries,
            GameConfig::default(),
            Box::new(SeededDice::new(seed)),
        )
    }

    // === Setup ===

    /// Register a participant. Only valid during setup; ids follow join
    /// order.
    pub fn add_player(
        &mut self,
        nickname: impl Into<String>,
        country_code: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<PlayerId, RuleViolation> {
        if self.phase != Phase::Setup {
            return Err(RuleViolation::SetupClosed { phase: self.phase });
        }
        if self.players.len() >= 4 {
            return Err(RuleViolation::BadPlayerCount {
                count: self.players.len() + 1,
            });
        }
        let id = PlayerId::new(self.players.len() as u8);
        self.players
            .push(PlayerRecord::new(id, nickname, country_code, color, &self.config));
        Ok(id)
    }

    /// Close setup and begin play with player 0.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, RuleViolation> {
        if self.phase != Phase::Setup {
            return Err(RuleViolation::SetupClosed { phase: self.phase });
        }
        if !(2..=4).contains(&self.players.len()) {
            return Err(RuleViolation::BadPlayerCount {
                count: self.players.len(),
            });
        }
        self.phase = Phase::Running;
        self.current = 0;
        self.turn_phase = TurnPhase::AwaitingRoll;
        tracing::info!(players = self.players.len(), "game started");
        Ok(self.commit(vec![GameEvent::GameStarted {
            players: self.players.len(),
        }]))
    }

    // === Turn commands ===

    /// Roll the dice for the current player and resolve everything up to
    /// the next required decision.
    pub fn roll(&mut self) -> Result<Vec<GameEvent>, RuleViolation> {
        self.require_running()?;
        let actor = self.current_player_id();
        if self.players[self.current].bankrupt {
            return Err(RuleViolation::PlayerBankrupt { player: actor });
        }
        self.require_no_debt()?;
        if self.turn_phase == TurnPhase::TurnComplete {
            return Err(RuleViolation::AlreadyRolled { player: actor });
        }

        let mut events = Vec::new();
        self.abandon_purchase_offer(&mut events);

        let roll = self.dice.roll();
        tracing::debug!(player = %actor, %roll, "roll");
        events.push(GameEvent::Rolled {
            player: actor,
            d1: roll.d1,
            d2: roll.d2,
        });

        let outcome = turn::resolve_roll(
            &self.config,
            self.board.cell_count(),
            &mut self.players[self.current],
            roll,
        );

        match outcome {
            RollOutcome::SentToJail => {
                events.push(GameEvent::SentToJail { player: actor });
                self.turn_phase = TurnPhase::TurnComplete;
            }
            RollOutcome::HeldInJail { jail_turns } => {
                events.push(GameEvent::StayedInJail {
                    player: actor,
                    jail_turns,
                });
                self.turn_phase = TurnPhase::TurnComplete;
            }
            RollOutcome::ServedSentence => {
                events.push(GameEvent::ReleasedFromJail {
                    player: actor,
                    moved: false,
                });
                self.turn_phase = TurnPhase::TurnComplete;
            }
            RollOutcome::Moved {
                from,
                to,
                passed_go,
                play_again,
                released,
            } => {
                if released {
                    events.push(GameEvent::ReleasedFromJail {
                        player: actor,
                        moved: true,
                    });
                }
                if passed_go {
                    events.push(GameEvent::PassedGo {
                        player: actor,
                        amount: self.config.pass_go_bonus,
                    });
                }
                events.push(GameEvent::Moved {
                    player: actor,
                    from,
                    to,
                });
                self.pending = landing::resolve_landing(
                    &self.config,
                    &mut self.board,
                    &mut self.players,
                    self.dice.as_mut(),
                    actor,
                    &mut events,
                );
                if play_again {
                    events.push(GameEvent::PlayAgain { player: actor });
                    self.turn_phase = TurnPhase::AwaitingRoll;
                } else {
                    self.turn_phase = TurnPhase::TurnComplete;
                }
            }
        }

        Ok(self.commit(events))
    }

    /// Pass the turn to the next player in rotation.
    ///
    /// Bankrupt players cannot roll, so their `end_turn` is accepted in
    /// any turn phase; everyone else must resolve their roll first.
    pub fn end_turn(&mut self) -> Result<Vec<GameEvent>, RuleViolation> {
        self.require_running()?;
        self.require_no_debt()?;
        let actor = self.current_player_id();
        if self.turn_phase == TurnPhase::AwaitingRoll && !self.players[self.current].bankrupt {
            return Err(RuleViolation::RollPending { player: actor });
        }

        let mut events = Vec::new();
        self.abandon_purchase_offer(&mut events);

        self.current = turn::next_player(self.current, self.players.len());
        self.turn_phase = TurnPhase::AwaitingRoll;
        let next = self.current_player_id();
        tracing::debug!(player = %next, "turn");
        events.push(GameEvent::TurnEnded { next });
        Ok(self.commit(events))
    }

    // === Purchase decisions ===

    /// Buy the offered cell at list price.
    pub fn buy(&mut self) -> Result<Vec<GameEvent>, RuleViolation> {
        self.require_running()?;
        let cell = self.pending_offer()?;
        let actor = self.current_player_id();
        let price = market::buy(&mut self.board, &mut self.players, actor, cell)?;
        self.pending = None;
        tracing::debug!(player = %actor, %cell, price, "bought");
        Ok(self.commit(vec![GameEvent::Purchased {
            player: actor,
            cell,
            price,
        }]))
    }

    /// Settle the auction for the offered cell: the decision layer names
    /// the winner and the winning bid.
    pub fn settle_auction(
        &mut self,
        winner: PlayerId,
        bid: Money,
    ) -> Result<Vec<GameEvent>, RuleViolation> {
        self.require_running()?;
        let cell = self.pending_offer()?;
        market::settle_auction(&mut self.board, &mut self.players, winner, cell, bid)?;
        self.pending = None;
        tracing::debug!(player = %winner, %cell, bid, "auction settled");
        Ok(self.commit(vec![GameEvent::AuctionWon {
            player: winner,
            cell,
            bid,
        }]))
    }

    /// Decline the offered cell; it stays unowned.
    pub fn decline_purchase(&mut self) -> Result<Vec<GameEvent>, RuleViolation> {
        self.require_running()?;
        let cell = self.pending_offer()?;
        self.pending = None;
        Ok(self.commit(vec![GameEvent::PurchaseDeclined { cell }]))
    }

    // === Owner commands ===

    /// Build one house on one of the current player's properties.
    pub fn build_house(&mut self, cell: CellId) -> Result<Vec<GameEvent>, RuleViolation> {
        let actor = self.require_acting_player()?;
        let houses =
            market::build_house(&self.config, &mut self.board, &mut self.players, actor, cell)?;
        Ok(self.commit(vec![GameEvent::HouseBuilt {
            player: actor,
            cell,
            houses,
        }]))
    }

    /// Upgrade four houses to a hotel.
    pub fn build_hotel(&mut self, cell: CellId) -> Result<Vec<GameEvent>, RuleViolation> {
        let actor = self.require_acting_player()?;
        market::build_hotel(&self.config, &mut self.board, &mut self.players, actor, cell)?;
        Ok(self.commit(vec![GameEvent::HotelBuilt { player: actor, cell }]))
    }

    /// Sell one building unit back to the bank.
    pub fn sell_building(&mut self, cell: CellId) -> Result<Vec<GameEvent>, RuleViolation> {
        let actor = self.require_acting_player()?;
        let sale =
            market::sell_building(&self.config, &mut self.board, &mut self.players, actor, cell)?;
        Ok(self.commit(vec![GameEvent::BuildingSold {
            player: actor,
            cell,
            hotel: sale.hotel,
            refund: sale.refund,
        }]))
    }

    /// Mortgage a property for its mortgage value.
    pub fn mortgage(&mut self, cell: CellId) -> Result<Vec<GameEvent>, RuleViolation> {
        let actor = self.require_acting_player()?;
        let value = market::mortgage(&mut self.board, &mut self.players, actor, cell)?;
        Ok(self.commit(vec![GameEvent::Mortgaged {
            player: actor,
            cell,
            value,
        }]))
    }

    /// Lift a mortgage at its value plus 10% interest, rounded up.
    pub fn unmortgage(&mut self, cell: CellId) -> Result<Vec<GameEvent>, RuleViolation> {
        let actor = self.require_acting_player()?;
        let cost = market::unmortgage(&mut self.board, &mut self.players, actor, cell)?;
        Ok(self.commit(vec![GameEvent::Unmortgaged {
            player: actor,
            cell,
            cost,
        }]))
    }

    /// Trade one of the current player's properties to another player for
    /// cash.
    pub fn trade(
        &mut self,
        to: PlayerId,
        cell: CellId,
        price: Money,
    ) -> Result<Vec<GameEvent>, RuleViolation> {
        let actor = self.require_acting_player()?;
        market::trade(&mut self.board, &mut self.players, actor, to, cell, price)?;
        tracing::debug!(from = %actor, to = %to, %cell, price, "trade");
        Ok(self.commit(vec![GameEvent::Traded {
            from: actor,
            to,
            cell,
            price,
        }]))
    }

    // === Bankruptcy ===

    /// Answer an unpayable debt by declaring bankruptcy: the whole estate
    /// moves to the creditor atomically and the player is out for good.
    pub fn declare_bankruptcy(&mut self) -> Result<Vec<GameEvent>, RuleViolation> {
        self.require_running()?;
        let Some(PendingDecision::DebtOwed { creditor, .. }) = self.pending else {
            return Err(RuleViolation::NoPendingDecision);
        };
        let actor = self.current_player_id();
        let transferred =
            market::declare_bankruptcy(&mut self.board, &mut self.players, actor, creditor)?;
        self.pending = None;
        self.turn_phase = TurnPhase::TurnComplete;
        tracing::info!(player = %actor, creditor = %creditor, transferred, "bankruptcy");
        Ok(self.commit(vec![GameEvent::Bankrupted {
            player: actor,
            creditor,
            transferred,
        }]))
    }

    // === Game end ===

    /// End the game, rank everyone, and drop score submissions into the
    /// void.
    pub fn finalize(&mut self) -> Result<Vec<ScoreEntry>, RuleViolation> {
        self.finalize_with(&mut NullSink)
    }

    /// End the game and push each score through the sink, best effort:
    /// delivery failures are ignored.
    pub fn finalize_with(
        &mut self,
        sink: &mut dyn ScoreSink,
    ) -> Result<Vec<ScoreEntry>, RuleViolation> {
        self.require_running()?;
        self.phase = Phase::Over;
        self.pending = None;
        let standing = scoring::rank(&self.board, &self.players);
        for entry in &standing {
            let delivered = sink.submit(&ScoreSubmission::from(entry));
            if !delivered {
                tracing::debug!(player = %entry.player, "score submission dropped");
            }
        }
        tracing::info!("game over");
        self.commit(vec![GameEvent::GameOver]);
        Ok(standing)
    }

    // === Persistence ===

    /// Capture the restorable state at a command boundary.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            players: self.players.clone(),
            current: self.current,
            phase: self.phase,
            board_state: self.board.ownership_state().clone(),
        }
    }

    /// Restore a snapshot taken against the same board definition.
    ///
    /// The next command expected is the restored current player's roll.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), LoadError> {
        if snapshot.current >= snapshot.players.len() {
            return Err(LoadError::SnapshotBadIndex {
                index: snapshot.current,
                players: snapshot.players.len(),
            });
        }
        for player in &snapshot.players {
            for holding in &player.properties {
                if self.board.ownership(holding.cell).is_none() {
                    return Err(LoadError::SnapshotUnknownCell { cell: holding.cell });
                }
                // Each mirror entry must restate its ownership record
                // exactly, and bankrupt players hold nothing.
                let agrees = snapshot.board_state.get(&holding.cell).is_some_and(|record| {
                    record.owner == Some(player.id)
                        && record.houses == holding.houses
                        && record.hotel == holding.hotel
                        && record.mortgaged == holding.mortgaged
                });
                if player.bankrupt || !agrees {
                    return Err(LoadError::SnapshotMirrorMismatch { cell: holding.cell });
                }
            }
        }
        for (cell, record) in &snapshot.board_state {
            if let Some(owner) = record.owner {
                let mirrored = snapshot
                    .players
                    .get(owner.index())
                    .is_some_and(|p| p.owns(*cell));
                if !mirrored {
                    return Err(LoadError::SnapshotMirrorMismatch { cell: *cell });
                }
            }
        }
        self.board.restore_ownership(&snapshot.board_state)?;
        self.players = snapshot.players.clone();
        self.current = snapshot.current;
        self.phase = snapshot.phase;
        self.pending = None;
        self.turn_phase = TurnPhase::AwaitingRoll;
        debug_assert!(self.mirrors_consistent());
        Ok(())
    }

    // === Read-only surface ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Look up one player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(id.index())
    }

    #[must_use]
    pub fn current_player(&self) -> &PlayerRecord {
        &self.players[self.current]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingDecision> {
        self.pending
    }

    /// Full event history since session creation.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    // === Internals ===

    fn require_running(&self) -> Result<(), RuleViolation> {
        if self.phase == Phase::Running {
            Ok(())
        } else {
            Err(RuleViolation::NotRunning { phase: self.phase })
        }
    }

    fn require_no_debt(&self) -> Result<(), RuleViolation> {
        if let Some(PendingDecision::DebtOwed { creditor, amount, .. }) = self.pending {
            return Err(RuleViolation::DebtOutstanding {
                player: self.current_player_id(),
                creditor,
                amount,
            });
        }
        Ok(())
    }

    /// Common guard for market commands issued by the current player.
    fn require_acting_player(&self) -> Result<PlayerId, RuleViolation> {
        self.require_running()?;
        self.require_no_debt()?;
        Ok(self.current_player_id())
    }

    fn current_player_id(&self) -> PlayerId {
        self.players[self.current].id
    }

    fn pending_offer(&self) -> Result<CellId, RuleViolation> {
        match self.pending {
            Some(PendingDecision::PurchaseOffer { cell }) => Ok(cell),
            _ => Err(RuleViolation::NoPendingDecision),
        }
    }

    /// Rolling again or ending the turn walks away from an open offer.
    fn abandon_purchase_offer(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(PendingDecision::PurchaseOffer { cell }) = self.pending {
            self.pending = None;
            events.push(GameEvent::PurchaseDeclined { cell });
        }
    }

    /// Append events to the history and hand them back to the caller.
    fn commit(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        for event in &events {
            self.history.push_back(event.clone());
        }
        debug_assert!(self.mirrors_consistent());
        events
    }

    /// Ownership records and player property mirrors must agree at every
    /// command boundary.
    fn mirrors_consistent(&self) -> bool {
        for (cell, record) in self.board.ownership_state() {
            match record.owner {
                Some(owner) => {
                    let Some(player) = self.players.get(owner.index()) else { return false };
                    if player.bankrupt {
                        return false;
                    }
                    let Some(mirror) = player.property(*cell) else { return false };
                    if mirror.houses != record.houses
                        || mirror.hotel != record.hotel
                        || mirror.mortgaged != record.mortgaged
                    {
                        return false;
                    }
                }
                None => {
                    if self.players.iter().any(|p| p.owns(*cell)) {
                        return false;
                    }
                }
            }
        }
        self.players
            .iter()
            .filter(|p| p.bankrupt)
            .all(|p| p.properties.is_empty())
    }
}
