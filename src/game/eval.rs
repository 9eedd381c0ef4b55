//! Hand evaluation: best-5-of-7 combination detection, tie-break ordering,
//! and multi-way winner ranking.
//!
//! [`best_combo`] probes the combination detectors in strict descending
//! order of strength and returns the first match, so every returned
//! [`Hand`] is the strongest combination the input supports. Detectors fill
//! their result out to exactly five cards with kickers in descending rank,
//! which doubles as the canonical comparison order: two hands with the same
//! combination tag compare card-by-card on rank and the first difference
//! decides.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::constants::MIN_EVAL_CARDS;
use super::entities::{Card, PlayerId, RANK_ACE, RankValue, Suit};
use super::errors::InternalError;

/// Combination tag, ordered weakest to strongest. A royal flush is just the
/// highest straight flush, not a distinct tag.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Combo {
    HighCard,
    Pair,
    TwoPair,
    Trips,
    Straight,
    Flush,
    FullHouse,
    Quads,
    StraightFlush,
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::Pair => "pair",
            Self::TwoPair => "two pair",
            Self::Trips => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::Quads => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// A resolved best hand: exactly five cards in the canonical comparison
/// order for their combination (groups before kickers, everything high to
/// low, the wheel's Ace last).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hand {
    cards: [Card; 5],
    combo: Combo,
}

impl Hand {
    #[must_use]
    pub fn combo(&self) -> Combo {
        self.combo
    }

    #[must_use]
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        write!(f, "{} ({})", self.combo, cards.join(" "))
    }
}

/// Hands of equal strength are equal regardless of suits.
impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hand {}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.combo.cmp(&other.combo).then_with(|| {
            for (a, b) in self.cards.iter().zip(other.cards.iter()) {
                match a.rank().cmp(&b.rank()) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                }
            }
            Ordering::Equal
        })
    }
}

/// Find the best five-card hand in the given cards (typically 2 hole +
/// up to 5 board). Deterministic and pure. Fewer than five cards is a
/// caller bug, not a game situation.
pub fn best_combo(cards: &[Card]) -> Result<Hand, InternalError> {
    if cards.len() < MIN_EVAL_CARDS {
        return Err(InternalError::NotEnoughCards(cards.len()));
    }
    let sorted = sorted_desc(cards);

    let hand = if let Some(best) = detect_straight_flush(&sorted) {
        Hand {
            cards: best,
            combo: Combo::StraightFlush,
        }
    } else if let Some(best) = detect_group(&sorted, 4) {
        Hand {
            cards: best,
            combo: Combo::Quads,
        }
    } else if let Some(best) = detect_full_house(&sorted) {
        Hand {
            cards: best,
            combo: Combo::FullHouse,
        }
    } else if let Some(best) = detect_flush(&sorted) {
        Hand {
            cards: best,
            combo: Combo::Flush,
        }
    } else if let Some(best) = detect_straight(&sorted) {
        Hand {
            cards: best,
            combo: Combo::Straight,
        }
    } else if let Some(best) = detect_group(&sorted, 3) {
        Hand {
            cards: best,
            combo: Combo::Trips,
        }
    } else if let Some(best) = detect_two_pair(&sorted) {
        Hand {
            cards: best,
            combo: Combo::TwoPair,
        }
    } else if let Some(best) = detect_group(&sorted, 2) {
        Hand {
            cards: best,
            combo: Combo::Pair,
        }
    } else {
        let mut best = [sorted[0]; 5];
        best.copy_from_slice(&sorted[..5]);
        Hand {
            cards: best,
            combo: Combo::HighCard,
        }
    };
    Ok(hand)
}

/// Rank (non-folded) players into tiers of tied hands, best tier first.
/// Within a tier, players are ordered by identifier purely so the output is
/// deterministic; the ordering carries no payout weight.
pub fn rank_hands(entries: &[PlayerHand]) -> Result<WinnerTiers, InternalError> {
    let mut evaluated = entries
        .iter()
        .map(|entry| best_combo(&entry.cards).map(|hand| (entry.player.clone(), hand)))
        .collect::<Result<Vec<_>, _>>()?;
    evaluated.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut tiers: WinnerTiers = Vec::new();
    let mut iter = evaluated.into_iter();
    if let Some((first, first_hand)) = iter.next() {
        let mut tier = vec![first];
        let mut tier_hand = first_hand;
        for (player, hand) in iter {
            if hand == tier_hand {
                tier.push(player);
            } else {
                tiers.push(tier);
                tier = vec![player];
                tier_hand = hand;
            }
        }
        tiers.push(tier);
    }
    Ok(tiers)
}

/// A showdown contender: identifier plus their candidate cards (hole cards
/// and whatever community cards have been dealt).
#[derive(Clone, Debug)]
pub struct PlayerHand {
    pub player: PlayerId,
    pub cards: Vec<Card>,
}

/// Ranked tiers of tied players; index 0 is the best.
pub type WinnerTiers = Vec<Vec<PlayerId>>;

fn sorted_desc(cards: &[Card]) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted
}

/// All groups of exactly `size` equal-rank cards, highest rank first.
/// `cards` must be sorted descending.
fn groups_of(cards: &[Card], size: usize) -> Vec<Vec<Card>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < cards.len() {
        let run_end = cards[i..]
            .iter()
            .take_while(|c| c.rank() == cards[i].rank())
            .count()
            + i;
        if run_end - i >= size {
            groups.push(cards[i..i + size].to_vec());
        }
        i = run_end;
    }
    groups
}

/// Fill `base` out to five cards with the highest remaining cards.
fn fill_kickers(mut base: Vec<Card>, cards: &[Card]) -> [Card; 5] {
    for &card in cards {
        if base.len() == 5 {
            break;
        }
        if !base.contains(&card) {
            base.push(card);
        }
    }
    let mut out = [base[0]; 5];
    out.copy_from_slice(&base);
    out
}

/// Best pair/trips/quads of the given size, plus kickers.
fn detect_group(cards: &[Card], size: usize) -> Option<[Card; 5]> {
    let groups = groups_of(cards, size);
    let best = groups.into_iter().next()?;
    Some(fill_kickers(best, cards))
}

fn detect_two_pair(cards: &[Card]) -> Option<[Card; 5]> {
    let pairs = groups_of(cards, 2);
    if pairs.len() < 2 {
        return None;
    }
    let mut base = pairs[0].clone();
    base.extend_from_slice(&pairs[1]);
    Some(fill_kickers(base, cards))
}

fn detect_full_house(cards: &[Card]) -> Option<[Card; 5]> {
    let trips = groups_of(cards, 3);
    let best_trips = trips.first()?;
    // The pair may itself come from a second set of trips.
    let pair = groups_of(cards, 2)
        .into_iter()
        .find(|group| group[0].rank() != best_trips[0].rank())?;
    let mut base = best_trips.clone();
    base.extend_from_slice(&pair);
    Some(fill_kickers(base, cards))
}

fn detect_flush(cards: &[Card]) -> Option<[Card; 5]> {
    flush_suit_cards(cards).map(|suited| {
        let mut out = [suited[0]; 5];
        out.copy_from_slice(&suited[..5]);
        out
    })
}

/// Cards of the flush-eligible suit, sorted descending. With at most seven
/// input cards only one suit can reach five.
fn flush_suit_cards(cards: &[Card]) -> Option<Vec<Card>> {
    for suit in Suit::ALL {
        let suited: Vec<Card> = cards.iter().copied().filter(|c| c.suit() == suit).collect();
        if suited.len() >= 5 {
            return Some(suited);
        }
    }
    None
}

/// Best straight in the given cards, if any. Handles the wheel (A-2-3-4-5)
/// by placing the Ace last so positional comparison ranks it below every
/// other straight.
fn detect_straight(cards: &[Card]) -> Option<[Card; 5]> {
    let mut distinct = cards.to_vec();
    distinct.dedup_by_key(|c| c.rank());
    for window in distinct.windows(5) {
        if window[0].rank() - window[4].rank() == 4 {
            let mut out = [window[0]; 5];
            out.copy_from_slice(window);
            return Some(out);
        }
    }
    // The wheel: no normal 5-run, but A,5,4,3,2 all present.
    let find = |rank: RankValue| distinct.iter().copied().find(|c| c.rank() == rank);
    if let (Some(ace), Some(five), Some(four), Some(three), Some(two)) =
        (find(RANK_ACE), find(5), find(4), find(3), find(2))
    {
        return Some([five, four, three, two, ace]);
    }
    None
}

/// Straight detection restricted to the flush suit's cards.
fn detect_straight_flush(cards: &[Card]) -> Option<[Card; 5]> {
    let suited = flush_suit_cards(cards)?;
    detect_straight(&suited)
}
