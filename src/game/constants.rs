//! Engine-wide constants.

use super::entities::Chips;

/// Hard cap on seats at a single table.
pub const MAX_SEATS: usize = 10;

/// Minimum number of seated players before a hand can start.
pub const MIN_PLAYERS: usize = 2;

/// Cards required before any combination detector may run.
pub const MIN_EVAL_CARDS: usize = 5;

/// Most cards a player hand can carry into evaluation (2 hole + 5 board).
pub const MAX_EVAL_CARDS: usize = 7;

pub const DEFAULT_BUY_IN: Chips = 600;
pub const DEFAULT_BIG_BLIND: Chips = DEFAULT_BUY_IN / 60;
pub const DEFAULT_SMALL_BLIND: Chips = DEFAULT_BIG_BLIND / 2;
