//! # Holdem Engine
//!
//! A multi-table Texas Hold'em engine built around an explicit finite state
//! machine per table.
//!
//! Each hand moves through a fixed progression of phases, dispatched with
//! `enum_dispatch` for zero-cost trait dispatch:
//!
//! - **WaitingPlayers**: seats open, countdown to the next hand
//! - **Initializing**: button movement and per-hand resets
//! - **ReadyToStart**: dealing hole cards
//! - **PostingSmallBlind/PostingBigBlind**: forced contributions
//! - **PreFlop/Flop/Turn/River**: the four betting streets
//! - **Done**: showdown, pot settlement, payouts
//! - **Finished**: cooldown before the next hand
//!
//! ## Core Modules
//!
//! - [`game`]: entities, hand evaluation, pot accounting, and the table FSM
//! - [`table`]: async actor wrapper and the multi-table manager
//!
//! ## Example
//!
//! ```
//! use holdem_engine::{GameSettings, Table};
//!
//! // Create an empty table waiting for players.
//! let table = Table::new(GameSettings::default());
//! assert!(table.available_to_join());
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameError, GameSettings, InternalError, Table, TableState,
    constants::{self, MAX_SEATS, MIN_PLAYERS},
    entities::{self, Action, Card, Chips, PlayerId, TableView},
    eval, pot,
};

/// Async table actor and multi-table management.
pub mod table;
pub use table::{TableActor, TableConfig, TableHandle, TableManager};
