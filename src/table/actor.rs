//! Table actor with async message handling.
//!
//! Each table runs as an independent task owning its [`Table`] exclusively.
//! Inbound requests arrive on an mpsc inbox and are drained interleaved with
//! a periodic tick; every action processed in a tick observes a consistent
//! snapshot of the table. Outbound updates go to bounded per-subscriber
//! queues with a non-blocking send, so a slow or dead consumer can never
//! stall the tick loop.

use std::collections::HashMap;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, interval},
};

use super::{
    TableId,
    config::TableConfig,
    messages::{TableMessage, TableUpdate},
};
use crate::game::{
    Table,
    entities::{Action, CardSource, Chips, GameEvent, PlayerId, SeatIndex, TableView},
    errors::GameError,
};

/// Capacity of the actor inbox and of each subscriber's update queue.
const CHANNEL_CAPACITY: usize = 100;

/// Handle for sending messages to a running table actor.
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    table_id: TableId,
}

impl TableHandle {
    #[must_use]
    pub fn new(sender: mpsc::Sender<TableMessage>, table_id: TableId) -> Self {
        Self { sender, table_id }
    }

    #[must_use]
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Send a raw message to the table.
    pub async fn send(&self, message: TableMessage) -> Result<(), GameError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| GameError::TableClosed)
    }

    pub async fn join(&self, player: PlayerId, buy_in: Chips) -> Result<SeatIndex, GameError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Join {
            player,
            buy_in,
            response,
        })
        .await?;
        rx.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn leave(&self, player: PlayerId) -> Result<Chips, GameError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Leave { player, response }).await?;
        rx.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn take_action(&self, player: PlayerId, action: Action) -> Result<(), GameError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::TakeAction {
            player,
            action,
            response,
        })
        .await?;
        rx.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn view(&self, player: Option<PlayerId>) -> Result<TableView, GameError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::GetView { player, response }).await?;
        rx.await.map_err(|_| GameError::TableClosed)
    }

    pub async fn available_to_join(&self) -> bool {
        let (response, rx) = oneshot::channel();
        if self
            .send(TableMessage::AvailableToJoin { response })
            .await
            .is_err()
        {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    pub async fn subscribe(
        &self,
        player: PlayerId,
        sender: mpsc::Sender<TableUpdate>,
    ) -> Result<(), GameError> {
        self.send(TableMessage::Subscribe { player, sender }).await
    }

    /// Drive one scheduler pulse by hand. Meant for tests.
    pub async fn tick(&self) -> Result<(), GameError> {
        self.send(TableMessage::Tick).await
    }

    /// Ask the table to shut down and wait for the acknowledgement.
    pub async fn close(&self) -> Result<(), GameError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Close { response }).await?;
        rx.await.map_err(|_| GameError::TableClosed)
    }
}

/// Actor owning a single poker table.
pub struct TableActor {
    id: TableId,
    config: TableConfig,
    table: Table,
    inbox: mpsc::Receiver<TableMessage>,
    subscribers: HashMap<PlayerId, mpsc::Sender<TableUpdate>>,
    is_closed: bool,
}

impl TableActor {
    /// Create an actor and the handle for talking to it.
    #[must_use]
    pub fn new(id: TableId, config: TableConfig) -> (Self, TableHandle) {
        let table = Table::new(config.game_settings());
        Self::with_table(id, config, table)
    }

    /// Create an actor around a table with a custom card source. Tests use
    /// this to script the deck.
    #[must_use]
    pub fn with_card_source(
        id: TableId,
        config: TableConfig,
        deck: Box<dyn CardSource>,
    ) -> (Self, TableHandle) {
        let table = Table::with_card_source(config.game_settings(), deck);
        Self::with_table(id, config, table)
    }

    fn with_table(id: TableId, config: TableConfig, table: Table) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(CHANNEL_CAPACITY);
        let actor = Self {
            id,
            config,
            table,
            inbox,
            subscribers: HashMap::new(),
            is_closed: false,
        };
        let handle = TableHandle::new(sender, id);
        (actor, handle)
    }

    /// Run the actor event loop until the table closes or every handle is
    /// dropped.
    pub async fn run(mut self) {
        log::info!("table {} '{}' starting", self.id, self.config.name);

        let mut tick_interval = interval(Duration::from_millis(250));

        loop {
            tokio::select! {
                maybe = self.inbox.recv() => {
                    match maybe {
                        Some(message) => self.handle_message(message),
                        None => break,
                    }
                    if self.is_closed {
                        break;
                    }
                }
                _ = tick_interval.tick() => {
                    self.tick();
                    if self.is_closed {
                        break;
                    }
                }
            }
        }

        log::info!("table {} '{}' closed", self.id, self.config.name);
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Join {
                player,
                buy_in,
                response,
            } => {
                let result = if self.is_closed {
                    Err(GameError::TableClosed)
                } else {
                    self.table.add_player(player, buy_in)
                };
                let _ = response.send(result);
            }

            TableMessage::Leave { player, response } => {
                self.subscribers.remove(&player);
                let _ = response.send(self.table.remove_player(&player));
            }

            TableMessage::TakeAction {
                player,
                action,
                response,
            } => {
                let _ = response.send(self.table.take_action(&player, action));
            }

            TableMessage::GetView { player, response } => {
                let _ = response.send(self.table.view_for(player.as_ref()));
            }

            TableMessage::AvailableToJoin { response } => {
                let _ = response.send(!self.is_closed && self.table.available_to_join());
            }

            TableMessage::Subscribe { player, sender } => {
                log::debug!("table {}: {player} subscribed", self.id);
                self.subscribers.insert(player, sender);
            }

            TableMessage::Unsubscribe { player } => {
                log::debug!("table {}: {player} unsubscribed", self.id);
                self.subscribers.remove(&player);
            }

            TableMessage::Tick => self.tick(),

            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    /// One scheduler pulse: advance the FSM, then fan updates out to
    /// subscribers. An internal engine error is a hard table failure.
    fn tick(&mut self) {
        if self.is_closed {
            return;
        }
        if let Err(e) = self.table.tick() {
            log::error!("table {}: {e}, closing table", self.id);
            self.is_closed = true;
            return;
        }
        let events: Vec<GameEvent> = self.table.drain_events().into();
        self.push_updates(&events);
    }

    /// Non-blocking fan-out. A full queue drops this update for that
    /// subscriber; a closed queue drops the subscriber.
    fn push_updates(&mut self, events: &[GameEvent]) {
        let table = &self.table;
        self.subscribers.retain(|player, sender| {
            let update = TableUpdate {
                view: table.view_for(Some(player)),
                events: events.to_vec(),
            };
            match sender.try_send(update) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("subscriber {player} queue full, dropping update");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("subscriber {player} disconnected, removing");
                    false
                }
            }
        });
    }
}
