//! Game state definitions for the table FSM.
//!
//! Each state is one phase of a hand's lifecycle. The states carry almost no
//! data of their own; everything they operate on lives in the table data and
//! is threaded through the phase hooks.

use std::time::Instant;

/// Seats are open and the table is waiting for enough players to start.
#[derive(Debug, Default)]
pub struct WaitingPlayers {}

/// Moving the button, resetting per-hand player state, shuffling.
#[derive(Debug, Default)]
pub struct Initializing {}

/// Dealing two hole cards to each seated player.
#[derive(Debug, Default)]
pub struct ReadyToStart {}

/// Forcing the small blind contribution.
#[derive(Debug, Default)]
pub struct PostingSmallBlind {}

/// Forcing the big blind contribution.
#[derive(Debug, Default)]
pub struct PostingBigBlind {}

/// First betting street, played on hole cards only.
#[derive(Debug, Default)]
pub struct PreFlop {}

/// Second betting street, after three community cards.
#[derive(Debug, Default)]
pub struct Flop {}

/// Third betting street, after the fourth community card.
#[derive(Debug, Default)]
pub struct Turn {}

/// Final betting street, after the fifth community card.
#[derive(Debug, Default)]
pub struct River {}

/// Showdown: evaluate hands, settle the pot, pay winners.
#[derive(Debug, Default)]
pub struct Done {}

/// Post-hand cooldown before seats reopen.
#[derive(Debug, Default)]
pub struct Finished {
    pub(crate) since: Option<Instant>,
}
