//! Table actor message types.

use tokio::sync::{mpsc, oneshot};

use crate::game::entities::{Action, Chips, GameEvent, PlayerId, SeatIndex, TableView};
use crate::game::errors::GameError;

/// Messages that can be sent to a table actor. Requests that need an answer
/// carry a oneshot response channel; the actor never replies out of band.
#[derive(Debug)]
pub enum TableMessage {
    /// Seat a player with the given buy-in.
    Join {
        player: PlayerId,
        buy_in: Chips,
        response: oneshot::Sender<Result<SeatIndex, GameError>>,
    },

    /// Stand a player up, returning their remaining stack.
    Leave {
        player: PlayerId,
        response: oneshot::Sender<Result<Chips, GameError>>,
    },

    /// Submit an in-hand action (bet, call, check, fold).
    TakeAction {
        player: PlayerId,
        action: Action,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Snapshot of the table from one player's perspective (or a public
    /// one when no player is given).
    GetView {
        player: Option<PlayerId>,
        response: oneshot::Sender<TableView>,
    },

    /// Whether the table has an open seat.
    AvailableToJoin { response: oneshot::Sender<bool> },

    /// Register an outbound update queue for a player.
    Subscribe {
        player: PlayerId,
        sender: mpsc::Sender<TableUpdate>,
    },

    /// Drop a player's outbound update queue.
    Unsubscribe { player: PlayerId },

    /// Force one scheduler pulse. Used by tests to drive the table
    /// deterministically.
    Tick,

    /// Shut the table down.
    Close { response: oneshot::Sender<()> },
}

/// Per-player update pushed once per tick to each subscriber.
#[derive(Clone, Debug)]
pub struct TableUpdate {
    pub view: TableView,
    pub events: Vec<GameEvent>,
}
