//! Error taxonomy for the engine.
//!
//! Two disjoint families: [`GameError`] covers rule violations a caller can
//! recover from (acting out of turn, joining a full table), while
//! [`InternalError`] covers precondition violations and resource exhaustion
//! that signal a bug or a broken table. An internal error aborts the current
//! tick and is surfaced to table-level supervision; it never aborts the
//! process.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::SeatIndex;

/// Invariant violations. These indicate a caller bug or an impossible table
/// state, not a bad player request.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum InternalError {
    #[error("need at least 5 cards to evaluate, got {0}")]
    NotEnoughCards(usize),
    #[error("deck exhausted mid-deal")]
    DeckExhausted,
    #[error("pot contribution must be positive")]
    NonPositiveContribution,
    #[error("seat {0} out of bounds")]
    InvalidSeat(SeatIndex),
    #[error("inconsistent table state: {0}")]
    Inconsistent(String),
}

/// Game-rule violations, returned synchronously to the acting caller. The
/// table state is unaffected by any of these.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("table is full")]
    TableFull,
    #[error("already seated")]
    AlreadySeated,
    #[error("game already in progress")]
    GameInProgress,
    #[error("not seated at this table")]
    NotSeated,
    #[error("not your turn")]
    OutOfTurn,
    #[error("not valid during this round")]
    ActionNotAllowed,
    #[error("illegal bet of {amount}: need at least {min}")]
    InvalidBet { amount: u32, min: u32 },
    #[error("pot not yet finalized")]
    PotNotFinalized,
    #[error("table closed")]
    TableClosed,
    #[error(transparent)]
    Internal(#[from] InternalError),
}
