//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::GameSettings;
use crate::game::constants::{
    DEFAULT_BIG_BLIND, DEFAULT_BUY_IN, DEFAULT_SMALL_BLIND, MAX_SEATS, MIN_PLAYERS,
};
use crate::game::entities::{Blinds, Chips};

/// Configuration for a single table. All timers are explicit so tables can
/// run at different speeds side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name, for logs and discovery.
    pub name: String,

    /// Number of seats (default: 10).
    pub max_seats: usize,

    /// Players required before a hand starts (default: 2).
    pub min_players: usize,

    /// Small blind amount.
    pub small_blind: Chips,

    /// Big blind amount.
    pub big_blind: Chips,

    /// Default buy-in for joining players.
    pub buy_in: Chips,

    /// Seconds a player may sit on their turn before being folded.
    pub action_timeout_secs: u64,

    /// Seconds between the end of a hand and seats reopening.
    pub post_hand_delay_secs: u64,

    /// Milliseconds of pacing between phase flips.
    pub inter_state_delay_millis: u64,

    /// Seconds from the last seating until a hand starts.
    pub wait_for_players_secs: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            max_seats: MAX_SEATS,
            min_players: MIN_PLAYERS,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            buy_in: DEFAULT_BUY_IN,
            action_timeout_secs: 30,
            post_hand_delay_secs: 5,
            inter_state_delay_millis: 1000,
            wait_for_players_secs: 10,
        }
    }
}

impl TableConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.big_blind <= self.small_blind {
            return Err("big blind must be greater than small blind".to_string());
        }
        if self.max_seats < 2 || self.max_seats > MAX_SEATS {
            return Err(format!("max seats must be between 2 and {MAX_SEATS}"));
        }
        if self.min_players < 2 || self.min_players > self.max_seats {
            return Err("min players must be between 2 and max seats".to_string());
        }
        if self.buy_in < self.big_blind {
            return Err("buy-in must cover at least the big blind".to_string());
        }
        Ok(())
    }

    /// Translate into the engine's settings.
    #[must_use]
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            blinds: Blinds {
                small: self.small_blind,
                big: self.big_blind,
            },
            buy_in: self.buy_in,
            max_seats: self.max_seats,
            min_players: self.min_players,
            action_timeout: Duration::from_secs(self.action_timeout_secs),
            post_hand_delay: Duration::from_secs(self.post_hand_delay_secs),
            inter_state_delay: Duration::from_millis(self.inter_state_delay_millis),
            wait_for_players_timeout: Duration::from_secs(self.wait_for_players_secs),
        }
    }

    /// A configuration with all pacing removed, for tests and simulations.
    #[must_use]
    pub fn instant(name: &str) -> Self {
        Self {
            name: name.to_string(),
            action_timeout_secs: 60,
            post_hand_delay_secs: 0,
            inter_state_delay_millis: 0,
            wait_for_players_secs: 0,
            ..Self::default()
        }
    }
}
