//! Integration tests for the actor layer.
//!
//! These drive full hands through a running table actor using the message
//! API, and cover join/leave routing through the manager plus the
//! non-blocking subscriber policy.

use tokio::sync::mpsc;
use uuid::Uuid;

use holdem_engine::entities::{Action, Card, CardSource, PlayerId, Suit};
use holdem_engine::game::errors::{GameError, InternalError};
use holdem_engine::table::{TableActor, TableConfig, TableHandle, TableManager};

#[derive(Debug)]
struct ScriptedDeck {
    cards: Vec<Card>,
    cursor: usize,
}

impl CardSource for ScriptedDeck {
    fn next_card(&mut self) -> Result<Card, InternalError> {
        let card = self
            .cards
            .get(self.cursor)
            .copied()
            .ok_or(InternalError::DeckExhausted)?;
        self.cursor += 1;
        Ok(card)
    }

    fn start_hand(&mut self) {
        self.cursor = 0;
    }
}

/// Hole cards for alice (a pair of Aces) and bob (King high), then a dry
/// board. Alice wins every showdown.
fn scripted_deck() -> Box<dyn CardSource> {
    Box::new(ScriptedDeck {
        cards: vec![
            Card(14, Suit::Club),
            Card(13, Suit::Heart),
            Card(14, Suit::Spade),
            Card(12, Suit::Diamond),
            Card(2, Suit::Club), // burn
            Card(7, Suit::Club),
            Card(9, Suit::Spade),
            Card(2, Suit::Diamond),
            Card(3, Suit::Club), // burn
            Card(3, Suit::Heart),
            Card(4, Suit::Club), // burn
            Card(11, Suit::Diamond),
        ],
        cursor: 0,
    })
}

fn spawn_scripted_table() -> TableHandle {
    let (actor, handle) =
        TableActor::with_card_source(Uuid::new_v4(), TableConfig::instant("test"), scripted_deck());
    tokio::spawn(actor.run());
    handle
}

/// Tick the table until its public state label matches, with a bounded
/// number of pulses.
async fn tick_until_state(handle: &TableHandle, wanted: &str) {
    for _ in 0..100 {
        let view = handle.view(None).await.unwrap();
        if view.state == wanted {
            return;
        }
        handle.tick().await.unwrap();
    }
    let view = handle.view(None).await.unwrap();
    panic!("table never reached '{wanted}', stuck at '{}'", view.state);
}

fn alice() -> PlayerId {
    "alice".into()
}

fn bob() -> PlayerId {
    "bob".into()
}

#[tokio::test]
async fn test_join_and_leave_through_actor() {
    let handle = spawn_scripted_table();

    let seat = handle.join(alice(), 600).await.unwrap();
    assert!(seat < TableConfig::default().max_seats);
    assert_eq!(
        handle.join(alice(), 600).await,
        Err(GameError::AlreadySeated)
    );

    assert_eq!(handle.leave(alice()).await, Ok(600));
    assert_eq!(handle.leave(alice()).await, Err(GameError::NotSeated));
}

#[tokio::test]
async fn test_closed_table_rejects_joins() {
    let handle = spawn_scripted_table();
    handle.close().await.unwrap();
    assert_eq!(handle.join(alice(), 600).await, Err(GameError::TableClosed));
}

#[tokio::test]
async fn test_full_hand_through_actor() {
    let handle = spawn_scripted_table();
    handle.join(alice(), 600).await.unwrap();
    handle.join(bob(), 600).await.unwrap();

    tick_until_state(&handle, "pre-flop").await;

    // Alice completes the small blind, bob checks his option.
    handle.take_action(alice(), Action::Call).await.unwrap();
    handle.take_action(bob(), Action::Check).await.unwrap();
    for street in ["flop", "turn", "river"] {
        tick_until_state(&handle, street).await;
        handle.take_action(alice(), Action::Check).await.unwrap();
        handle.take_action(bob(), Action::Check).await.unwrap();
    }
    tick_until_state(&handle, "waiting for players").await;

    // Alice's pair of Aces won the 20-chip pot at showdown.
    let view = handle.view(None).await.unwrap();
    let stacks: Vec<(PlayerId, u32)> = view
        .players
        .iter()
        .map(|p| (p.id.clone(), p.stack))
        .collect();
    assert!(stacks.contains(&(alice(), 610)));
    assert!(stacks.contains(&(bob(), 590)));
}

#[tokio::test]
async fn test_subscriber_receives_personalized_updates() {
    let handle = spawn_scripted_table();
    handle.join(alice(), 600).await.unwrap();
    handle.join(bob(), 600).await.unwrap();

    let (tx, mut rx) = mpsc::channel(32);
    handle.subscribe(alice(), tx).await.unwrap();
    tick_until_state(&handle, "pre-flop").await;

    // Drain to the freshest update and check alice sees only her own
    // hole cards.
    let mut latest = None;
    while let Ok(update) = rx.try_recv() {
        latest = Some(update);
    }
    let update = latest.expect("no update pushed");
    let alice_view = update
        .view
        .players
        .iter()
        .find(|p| p.id == alice())
        .unwrap();
    let bob_view = update.view.players.iter().find(|p| p.id == bob()).unwrap();
    assert_eq!(alice_view.hole_cards.as_ref().map(Vec::len), Some(2));
    assert!(bob_view.hole_cards.is_none());
}

#[tokio::test]
async fn test_slow_subscriber_does_not_stall_the_table() {
    let handle = spawn_scripted_table();
    handle.join(alice(), 600).await.unwrap();
    handle.join(bob(), 600).await.unwrap();

    // A one-slot queue that is never drained.
    let (tx, _rx) = mpsc::channel(1);
    handle.subscribe(bob(), tx).await.unwrap();

    // The table keeps ticking and answering queries regardless.
    tick_until_state(&handle, "pre-flop").await;
    let view = handle.view(Some(bob())).await.unwrap();
    assert_eq!(view.players.len(), 2);
}

#[tokio::test]
async fn test_manager_routes_players_to_open_tables() {
    let manager = TableManager::new();
    let id = manager
        .create_table(TableConfig::instant("lobby"))
        .await
        .unwrap();
    assert_eq!(manager.table_count().await, 1);

    let (table_a, _) = manager.join_any(alice()).await.unwrap();
    let (table_b, _) = manager.join_any(bob()).await.unwrap();
    assert_eq!(table_a, id);
    assert_eq!(table_b, id);

    let tables = manager.list_tables().await;
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].player_count, 2);

    manager.close_table(id).await.unwrap();
    assert_eq!(manager.table_count().await, 0);
    assert!(manager.join_any(alice()).await.is_err());
}

#[tokio::test]
async fn test_manager_rejects_invalid_config() {
    let manager = TableManager::new();
    let config = TableConfig {
        small_blind: 50,
        big_blind: 10,
        ..TableConfig::default()
    };
    assert!(manager.create_table(config).await.is_err());
}
