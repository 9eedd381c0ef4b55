//! Chip accounting for a single hand: the main pot, side pots created by
//! all-ins, and the final payout split.
//!
//! A [`Pot`] is an ordered list of [`Subpot`]s. Each subpot either carries a
//! per-player contribution cap (a side pot closed off by an all-in) or is
//! unlimited; the last subpot is always the unlimited one. Contributions
//! spill through the capped subpots in creation order before landing in the
//! unlimited tail, so every chip is attributed to exactly one subpot and
//! nothing is ever lost or minted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::entities::{Chips, PlayerId};
use super::errors::{GameError, InternalError};
use super::eval::WinnerTiers;

/// One layer of the pot. `limit == 0` means uncapped.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Subpot {
    limit: Chips,
    contributions: BTreeMap<PlayerId, Chips>,
}

impl Subpot {
    #[must_use]
    pub fn total(&self) -> Chips {
        self.contributions.values().sum()
    }

    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.contributions.contains_key(player)
    }

    /// Remaining room for `player` under this subpot's cap. Unlimited
    /// subpots report the full amount as room.
    fn room_for(&self, player: &PlayerId, amount: Chips) -> Chips {
        if self.limit == 0 {
            return amount;
        }
        let already = self.contributions.get(player).copied().unwrap_or(0);
        amount.min(self.limit.saturating_sub(already))
    }

    fn put(&mut self, player: &PlayerId, amount: Chips) {
        *self.contributions.entry(player.clone()).or_insert(0) += amount;
    }
}

/// All chips committed during the current hand, plus the payout once the
/// hand resolves.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pot {
    subpots: Vec<Subpot>,
    finalized: bool,
    winnings: BTreeMap<PlayerId, Chips>,
}

impl Default for Pot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subpots: vec![Subpot::default()],
            finalized: false,
            winnings: BTreeMap::new(),
        }
    }

    /// Record `amount` chips from `player`, spilling through capped subpots
    /// in order. An all-in contribution caps the subpot the player's chips
    /// last landed in at the player's total there and inserts a fresh side
    /// pot immediately behind it, moving every other player's excess into
    /// it. A short all-in therefore splits an earlier capped layer rather
    /// than leaving the player exposed to chips they never covered.
    ///
    /// Adding to an already finalized pot reopens it and discards the stale
    /// payout.
    pub fn add(
        &mut self,
        player: &PlayerId,
        amount: Chips,
        all_in: bool,
    ) -> Result<(), InternalError> {
        if amount == 0 {
            return Err(InternalError::NonPositiveContribution);
        }
        if self.finalized {
            self.finalized = false;
            self.winnings.clear();
        }

        let mut remaining = amount;
        let mut landed = None;
        for (index, subpot) in self.subpots.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }
            let portion = subpot.room_for(player, remaining);
            if portion > 0 {
                subpot.put(player, portion);
                remaining -= portion;
                landed = Some(index);
            }
        }
        debug_assert_eq!(remaining, 0, "unlimited tail must absorb the rest");

        if all_in {
            if let Some(index) = landed {
                self.cap_at(index, player);
            }
        }
        Ok(())
    }

    /// Cap the subpot at `index` at `player`'s contribution there and insert
    /// a new subpot right after it holding everyone's excess. Splitting the
    /// unlimited tail leaves the new subpot unlimited; splitting a capped
    /// layer gives it the remainder of the old cap.
    fn cap_at(&mut self, index: usize, player: &PlayerId) {
        let subpot = &mut self.subpots[index];
        let cap = subpot.contributions.get(player).copied().unwrap_or(0);
        if cap == 0 || subpot.limit == cap {
            // Already sits exactly on a boundary.
            return;
        }

        let mut overflow = Subpot {
            limit: subpot.limit.saturating_sub(cap),
            contributions: BTreeMap::new(),
        };
        for (contributor, total) in &mut subpot.contributions {
            if *total > cap {
                overflow.put(contributor, *total - cap);
                *total = cap;
            }
        }
        subpot.limit = cap;
        self.subpots.insert(index + 1, overflow);
    }

    /// Settle the pot against ranked showdown tiers. Each subpot goes to the
    /// best tier holding at least one of its contributors and is split
    /// evenly across that whole tier, leftover chips going one at a time to
    /// the earliest-listed winners. A subpot no tier can claim is dropped
    /// with a warning rather than paid out.
    pub fn finalize(&mut self, tiers: &WinnerTiers) {
        let mut winnings: BTreeMap<PlayerId, Chips> = BTreeMap::new();
        for subpot in &self.subpots {
            let total = subpot.total();
            if total == 0 {
                continue;
            }
            let Some(winners) = tiers
                .iter()
                .find(|tier| tier.iter().any(|p| subpot.contains(p)))
            else {
                log::warn!("subpot of {total} chips has no eligible winner, dropping it");
                continue;
            };
            let count = winners.len() as Chips;
            let share = total / count;
            let mut remainder = total % count;
            for winner in winners {
                let mut payout = share;
                if remainder > 0 {
                    payout += 1;
                    remainder -= 1;
                }
                *winnings.entry(winner.clone()).or_insert(0) += payout;
            }
        }
        self.winnings = winnings;
        self.finalized = true;
    }

    /// The settled payout. Fails until [`finalize`](Self::finalize) has run.
    pub fn winnings(&self) -> Result<&BTreeMap<PlayerId, Chips>, GameError> {
        if !self.finalized {
            return Err(GameError::PotNotFinalized);
        }
        Ok(&self.winnings)
    }

    /// One player's payout, zero if they won nothing. Fails until the pot
    /// is finalized.
    pub fn player_winnings(&self, player: &PlayerId) -> Result<Chips, GameError> {
        Ok(self.winnings()?.get(player).copied().unwrap_or(0))
    }

    /// Everything `player` has committed this hand, across all subpots.
    #[must_use]
    pub fn player_total(&self, player: &PlayerId) -> Chips {
        self.subpots
            .iter()
            .map(|s| s.contributions.get(player).copied().unwrap_or(0))
            .sum()
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.subpots.iter().map(Subpot::total).sum()
    }

    #[must_use]
    pub fn subpots(&self) -> &[Subpot] {
        &self.subpots
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}
