//! Full-session scenarios on the classic 40-cell board.
//!
//! These drive the engine the way a hot-seat frontend would: commands in,
//! events and snapshots out, with scripted dice standing in for the players'
//! luck.

mod common;

use common::{running_session, two_player_session};
use magnate::{
    CellId, GameEvent, OwnedProperty, PendingDecision, Phase, PlayerId, RuleViolation,
    ScriptedDice, TurnPhase,
};

const ANA: PlayerId = PlayerId::new(0);
const BETO: PlayerId = PlayerId::new(1);

/// Landing on an unowned railroad and buying it debits the list price.
#[test]
fn test_buy_railroad_at_list_price() {
    let mut s = two_player_session(ScriptedDice::from_rolls(&[(2, 3)]));

    s.roll().unwrap();
    assert_eq!(
        s.pending(),
        Some(PendingDecision::PurchaseOffer { cell: CellId::new(5) })
    );

    let events = s.buy().unwrap();

    assert!(events.contains(&GameEvent::Purchased {
        player: ANA,
        cell: CellId::new(5),
        price: 200,
    }));
    assert_eq!(s.current_player().cash, 1300);
    assert_eq!(
        s.board().ownership(CellId::new(5)).unwrap().owner,
        Some(ANA)
    );
}

/// Crossing the start cell pays the bonus exactly once per lap.
#[test]
fn test_pass_go_pays_bonus() {
    let mut s = two_player_session(ScriptedDice::from_rolls(&[(2, 3)]));
    let mut snap = s.snapshot();
    snap.players[0].position = CellId::new(38);
    s.restore(&snap).unwrap();

    let events = s.roll().unwrap();

    assert!(events.contains(&GameEvent::PassedGo { player: ANA, amount: 200 }));
    assert_eq!(s.current_player().position, CellId::new(3));
    // 1500 + bonus; the brown property at 3 is only offered, not charged.
    assert_eq!(s.current_player().cash, 1700);
    s.decline_purchase().unwrap();
}

/// A property with three houses charges the third house tier.
#[test]
fn test_three_house_rent() {
    let mut s = two_player_session(ScriptedDice::from_rolls(&[(1, 2)]));
    let mut snap = s.snapshot();
    for cell in [1u8, 3] {
        let id = CellId::new(cell);
        let record = snap.board_state.get_mut(&id).unwrap();
        record.owner = Some(ANA);
        record.houses = 3;
        let mut mirror = OwnedProperty::new(id, s.board().cell(id).unwrap().category);
        mirror.houses = 3;
        snap.players[0].properties.push(mirror);
    }
    snap.players[1].position = CellId::new(38);
    snap.current = 1;
    s.restore(&snap).unwrap();

    let events = s.roll().unwrap();

    // 38 + 3 wraps to cell 1: +200 for the lap, -90 for the rent tier.
    assert!(events.contains(&GameEvent::RentPaid {
        payer: BETO,
        owner: ANA,
        cell: CellId::new(1),
        amount: 90,
    }));
    assert_eq!(s.players()[1].cash, 1610);
    assert_eq!(s.players()[0].cash, 1590);
}

/// Three consecutive doubles send the roller to jail without moving.
#[test]
fn test_three_doubles_jail() {
    let mut dice = ScriptedDice::from_rolls(&[(1, 1), (2, 2), (3, 3)]);
    dice.push_draw(0);
    let mut s = two_player_session(dice);

    s.roll().unwrap(); // lands on community chest, keeps the turn
    s.roll().unwrap(); // lands on a property, keeps the turn
    let events = s.roll().unwrap();

    assert!(events.contains(&GameEvent::SentToJail { player: ANA }));
    let ana = s.current_player();
    assert!(ana.in_jail);
    assert_eq!(ana.position, CellId::new(10));
    assert_eq!(s.turn_phase(), TurnPhase::TurnComplete);
    // The third roll never moves, so the pending offer from the second
    // landing was walked away from.
    assert!(events.contains(&GameEvent::PurchaseDeclined { cell: CellId::new(6) }));
    assert_eq!(s.pending(), None);
}

/// A double rolled in jail releases the player and moves them.
#[test]
fn test_jail_double_releases_and_moves() {
    let mut s = two_player_session(ScriptedDice::from_rolls(&[(2, 2)]));
    let mut snap = s.snapshot();
    snap.players[0].in_jail = true;
    snap.players[0].position = CellId::new(10);
    s.restore(&snap).unwrap();

    let events = s.roll().unwrap();

    assert!(events.contains(&GameEvent::ReleasedFromJail { player: ANA, moved: true }));
    let ana = s.current_player();
    assert!(!ana.in_jail);
    assert_eq!(ana.position, CellId::new(14));
    // A jail double does not grant another roll.
    assert_eq!(s.turn_phase(), TurnPhase::TurnComplete);
}

/// Failing to roll a double for the maximum number of turns releases the
/// player in place.
#[test]
fn test_jail_sentence_served_in_place() {
    let dice = ScriptedDice::from_rolls(&[
        (1, 2), // Ana: stays
        (2, 4), // Beto: lands on a property
        (1, 3), // Ana: stays
        (1, 2), // Beto
        (1, 4), // Ana: third failure, released without moving
    ]);
    let mut s = two_player_session(dice);
    let mut snap = s.snapshot();
    snap.players[0].in_jail = true;
    snap.players[0].position = CellId::new(10);
    s.restore(&snap).unwrap();

    let events = s.roll().unwrap();
    assert!(events.contains(&GameEvent::StayedInJail { player: ANA, jail_turns: 1 }));
    s.end_turn().unwrap();
    s.roll().unwrap();
    s.end_turn().unwrap();

    let events = s.roll().unwrap();
    assert!(events.contains(&GameEvent::StayedInJail { player: ANA, jail_turns: 2 }));
    s.end_turn().unwrap();
    s.roll().unwrap();
    s.end_turn().unwrap();

    let events = s.roll().unwrap();
    assert!(events.contains(&GameEvent::ReleasedFromJail { player: ANA, moved: false }));
    let ana = &s.players()[0];
    assert!(!ana.in_jail);
    assert_eq!(ana.jail_turns, 0);
    assert_eq!(ana.position, CellId::new(10));
}

/// Unpayable rent forces a decision; bankruptcy moves the whole estate to
/// the creditor with building and mortgage state intact.
#[test]
fn test_bankruptcy_transfers_estate() {
    let mut s = two_player_session(ScriptedDice::from_rolls(&[(1, 0)]));
    let mut snap = s.snapshot();
    // Beto holds the target property with three houses.
    let rent_cell = CellId::new(1);
    let record = snap.board_state.get_mut(&rent_cell).unwrap();
    record.owner = Some(BETO);
    record.houses = 3;
    let mut mirror = OwnedProperty::new(rent_cell, s.board().cell(rent_cell).unwrap().category);
    mirror.houses = 3;
    snap.players[1].properties.push(mirror);
    // Ana holds a railroad and a mortgaged property, but almost no cash.
    for (cell, mortgaged) in [(5u8, false), (6, true)] {
        let id = CellId::new(cell);
        let record = snap.board_state.get_mut(&id).unwrap();
        record.owner = Some(ANA);
        record.mortgaged = mortgaged;
        let mut mirror = OwnedProperty::new(id, s.board().cell(id).unwrap().category);
        mirror.mortgaged = mortgaged;
        snap.players[0].properties.push(mirror);
    }
    snap.players[0].cash = 10;
    s.restore(&snap).unwrap();

    s.roll().unwrap();
    assert_eq!(
        s.pending(),
        Some(PendingDecision::DebtOwed {
            cell: rent_cell,
            creditor: BETO,
            amount: 90,
        })
    );
    assert_eq!(
        s.roll().unwrap_err(),
        RuleViolation::DebtOutstanding { player: ANA, creditor: BETO, amount: 90 }
    );

    let events = s.declare_bankruptcy().unwrap();

    assert!(events.contains(&GameEvent::Bankrupted {
        player: ANA,
        creditor: BETO,
        transferred: 2,
    }));
    assert!(s.players()[0].bankrupt);
    assert!(s.players()[0].properties.is_empty());
    assert_eq!(s.board().ownership(CellId::new(5)).unwrap().owner, Some(BETO));
    let mortgaged = s.board().ownership(CellId::new(6)).unwrap();
    assert_eq!(mortgaged.owner, Some(BETO));
    assert!(mortgaged.mortgaged);
    assert!(s.players()[1].owns(CellId::new(5)));
    assert!(s.players()[1].property(CellId::new(6)).unwrap().mortgaged);
}

/// A saved snapshot resumes play mid-rotation in a fresh session.
#[test]
fn test_snapshot_resumes_mid_rotation() {
    let players = [("Ana", "CO"), ("Beto", "MX"), ("Cata", "AR")];
    let mut s = running_session(&players, ScriptedDice::from_rolls(&[(2, 3)]));
    s.roll().unwrap();
    s.buy().unwrap();
    s.end_turn().unwrap();

    let mut snap = s.snapshot();
    snap.current = 2;
    let bytes = snap.to_bytes().unwrap();

    let mut restored = running_session(&players, ScriptedDice::from_rolls(&[(3, 3)]));
    restored
        .restore(&magnate::Snapshot::from_bytes(&bytes).unwrap())
        .unwrap();

    assert_eq!(restored.current_index(), 2);
    assert_eq!(restored.phase(), Phase::Running);
    assert_eq!(
        restored.board().ownership(CellId::new(5)).unwrap().owner,
        Some(ANA)
    );
    // Play resumes with Cata's roll.
    let events = restored.roll().unwrap();
    assert!(events.contains(&GameEvent::Rolled { player: PlayerId::new(2), d1: 3, d2: 3 }));
}

/// Finalizing ranks everyone by net worth and closes the session.
#[test]
fn test_finalize_ranks_by_net_worth() {
    let mut s = two_player_session(ScriptedDice::new());
    let mut snap = s.snapshot();
    // Ana: 1000 cash + property worth 60 + two houses at 100 each.
    let id = CellId::new(1);
    let record = snap.board_state.get_mut(&id).unwrap();
    record.owner = Some(ANA);
    record.houses = 2;
    let mut mirror = OwnedProperty::new(id, s.board().cell(id).unwrap().category);
    mirror.houses = 2;
    snap.players[0].properties.push(mirror);
    snap.players[0].cash = 1000;
    // Beto: 1200 cash minus a mortgaged railroad's price.
    let rail = CellId::new(5);
    let record = snap.board_state.get_mut(&rail).unwrap();
    record.owner = Some(BETO);
    record.mortgaged = true;
    let mut mirror = OwnedProperty::new(rail, s.board().cell(rail).unwrap().category);
    mirror.mortgaged = true;
    snap.players[1].properties.push(mirror);
    snap.players[1].cash = 1200;
    s.restore(&snap).unwrap();

    let standing = s.finalize().unwrap();

    assert_eq!(s.phase(), Phase::Over);
    assert_eq!(standing.len(), 2);
    assert_eq!(standing[0].player, ANA);
    assert_eq!(standing[0].score, 1000 + 60 + 200);
    assert_eq!(standing[1].player, BETO);
    assert_eq!(standing[1].score, 1200 - 200);
    assert!(s.history().iter().any(|e| *e == GameEvent::GameOver));

    assert_eq!(
        s.roll().unwrap_err(),
        RuleViolation::NotRunning { phase: Phase::Over }
    );
}
