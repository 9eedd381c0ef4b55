//! Poker engine core.
//!
//! This module holds everything a single table needs to play a hand of
//! Texas Hold'em end-to-end:
//! - [`entities`]: cards, decks, players, actions, views
//! - [`eval`]: best-5-of-7 hand evaluation and winner ranking
//! - [`pot`]: pot and side-pot accounting
//! - [`state_machine`]: the per-table FSM driving a hand street by street
//!
//! The `table` module wraps a [`Table`] in an async actor for concurrent
//! multi-table operation.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod eval;
pub mod pot;
pub mod state_machine;
pub mod states;

pub use errors::{GameError, InternalError};
pub use state_machine::{GameSettings, Phase, Table, TableData, TableState};
