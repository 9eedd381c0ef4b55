use rand::{rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::constants;
use super::errors::InternalError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Spade, Self::Diamond, Self::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Card rank as a plain value: 2..=14, with the Ace always stored high (14).
/// The wheel straight is the only place an Ace plays low, and the evaluator
/// handles that positionally rather than by re-valuing the card.
pub type RankValue = u8;

pub const RANK_TWO: RankValue = 2;
pub const RANK_ACE: RankValue = 14;

/// A card is a tuple of a rank value (2..=14) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub RankValue, pub Suit);

impl Card {
    #[must_use]
    pub const fn rank(self) -> RankValue {
        self.0
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            v => &v.to_string(),
        };
        let repr = format!("{value}{}", self.1);
        write!(f, "{repr:>3}")
    }
}

/// Opaque card sequence consumed by the table. The standard [`Deck`]
/// implements it; tests substitute scripted sequences.
pub trait CardSource: fmt::Debug + Send {
    /// Draw the next card. Exhaustion is an internal error: a table never
    /// draws more cards than a full deck holds in one hand.
    fn next_card(&mut self) -> Result<Card, InternalError>;

    /// Prepare the source for a fresh hand.
    fn start_hand(&mut self);
}

/// A standard 52-card deck with a draw cursor, reshuffled each hand.
#[derive(Debug)]
pub struct Deck {
    cards: [Card; 52],
    cursor: usize,
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card(RANK_TWO, Suit::Club); 52];
        for (i, rank) in (RANK_TWO..=RANK_ACE).enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card(rank, suit);
            }
        }
        Self { cards, cursor: 0 }
    }
}

impl CardSource for Deck {
    fn next_card(&mut self) -> Result<Card, InternalError> {
        let card = self
            .cards
            .get(self.cursor)
            .copied()
            .ok_or(InternalError::DeckExhausted)?;
        self.cursor += 1;
        Ok(card)
    }

    fn start_hand(&mut self) {
        self.cards.shuffle(&mut rng());
        self.cursor = 0;
    }
}

/// Type alias for whole chips. All bets and stacks are whole chips.
pub type Chips = u32;

/// Type alias for seat positions at a table.
pub type SeatIndex = usize;

/// Identifier supplied by the player registry. The engine never creates or
/// authenticates identities; it only keys state by them.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        let mut id: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        if id.len() > 32 {
            // Back off to a char boundary so multibyte names cannot split.
            let mut cut = 32;
            while !id.is_char_boundary(cut) {
                cut -= 1;
            }
            id.truncate(cut);
        }
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl Default for Blinds {
    fn default() -> Self {
        Self {
            small: constants::DEFAULT_SMALL_BLIND,
            big: constants::DEFAULT_BIG_BLIND,
        }
    }
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

/// A voluntary in-hand action submitted by a player. A bet that matches or
/// exceeds the player's stack is treated as an all-in rather than rejected.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    Bet(Chips),
    Call,
    Check,
    Fold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Bet(amount) => &format!("bets {amount}"),
            Self::Call => "calls",
            Self::Check => "checks",
            Self::Fold => "folds",
        };
        write!(f, "{repr}")
    }
}

/// The last thing a player did this hand, surfaced in views.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LastAction {
    AllIn,
    Bet,
    Call,
    Check,
    Fold,
    PostedBlind,
    TimedOut,
    Wait,
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn => "all-in",
            Self::Bet => "bet",
            Self::Call => "call",
            Self::Check => "check",
            Self::Fold => "folded",
            Self::PostedBlind => "blind",
            Self::TimedOut => "timed out",
            Self::Wait => "waiting",
        };
        write!(f, "{repr}")
    }
}

/// A seated player. Owned by the table; the stack carries over across hands
/// while hole cards and the fold/all-in flags reset each hand.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub seat: SeatIndex,
    pub stack: Chips,
    /// Total wagered this hand.
    pub total_bet: Chips,
    /// Wagered on the current street only.
    pub bet_this_round: Chips,
    pub folded: bool,
    pub all_in: bool,
    /// Set at street entry for everyone who can still act; cleared once the
    /// player has matched the street's bet.
    pub action_required: bool,
    pub last_action: LastAction,
    pub hole_cards: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, seat: SeatIndex, stack: Chips) -> Self {
        Self {
            id,
            seat,
            stack,
            total_bet: 0,
            bet_this_round: 0,
            folded: false,
            all_in: false,
            action_required: false,
            last_action: LastAction::Wait,
            hole_cards: Vec::with_capacity(2),
        }
    }

    /// Clear all per-hand state. The stack is untouched.
    pub fn reset_for_hand(&mut self) {
        self.total_bet = 0;
        self.bet_this_round = 0;
        self.folded = false;
        self.all_in = false;
        self.action_required = false;
        self.last_action = LastAction::Wait;
        self.hole_cards.clear();
    }

    /// Whether this player still has a voluntary decision to make.
    #[must_use]
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }
}

/// Public per-seat snapshot. Hole cards appear only in the seat owner's view.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub seat: SeatIndex,
    pub stack: Chips,
    pub bet_this_round: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub last_action: LastAction,
    pub hole_cards: Option<Vec<Card>>,
}

/// Per-player game-state snapshot pushed once per tick.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TableView {
    pub state: String,
    pub board: Vec<Card>,
    pub pot_total: Chips,
    pub blinds: Blinds,
    pub button: SeatIndex,
    pub turn: Option<PlayerId>,
    pub players: Vec<PlayerView>,
}

/// Events emitted as the hand progresses, drained by the actor each tick.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    Seated(PlayerId),
    StoodUp(PlayerId),
    BlindPosted(PlayerId, Chips),
    ActionTaken(PlayerId, LastAction),
    TimedOut(PlayerId),
    BoardDealt(Vec<Card>),
    Won(PlayerId, Chips),
    PotUnclaimed(Chips),
    HandFinished,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Seated(id) => format!("{id} took a seat"),
            Self::StoodUp(id) => format!("{id} left the table"),
            Self::BlindPosted(id, amount) => format!("{id} posted a {amount} blind"),
            Self::ActionTaken(id, action) => format!("{id}: {action}"),
            Self::TimedOut(id) => format!("{id} timed out and folded"),
            Self::BoardDealt(cards) => {
                let cards: Vec<String> = cards.iter().map(ToString::to_string).collect();
                format!("board: {}", cards.join(" "))
            }
            Self::Won(id, amount) => format!("{id} won {amount}"),
            Self::PotUnclaimed(amount) => format!("{amount} left unclaimed"),
            Self::HandFinished => "hand finished".to_string(),
        };
        write!(f, "{repr}")
    }
}
