//! The per-table finite state machine.
//!
//! A hand moves through a fixed forward progression of phases:
//!
//! ```text
//! WaitingPlayers -> Initializing -> ReadyToStart -> PostingSmallBlind
//!   -> PostingBigBlind -> PreFlop -> Flop -> Turn -> River -> Done
//!   -> Finished -> WaitingPlayers
//! ```
//!
//! Each phase implements [`Phase`]: an `init` hook run once on entry, a
//! `tick` run every scheduler pulse that may hand back the next phase, and
//! an action handler that only the betting streets accept. The [`Table`]
//! drives the dispatch, inserting a configurable pacing delay between
//! phases, and owns all seat, pot, and board state exclusively.

use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use super::constants::{DEFAULT_BUY_IN, MAX_SEATS, MIN_PLAYERS};
use super::entities::{
    Action, Blinds, Card, CardSource, Chips, Deck, GameEvent, LastAction, Player, PlayerId,
    PlayerView, SeatIndex, TableView,
};
use super::errors::{GameError, InternalError};
use super::eval::{PlayerHand, rank_hands};
use super::pot::Pot;
use super::states::{
    Done, Finished, Flop, Initializing, PostingBigBlind, PostingSmallBlind, PreFlop, ReadyToStart,
    River, Turn, WaitingPlayers,
};

/// Per-table configuration. Every timer that used to be process-global in
/// older engines is explicit here so tables can run at different speeds.
#[derive(Clone, Debug)]
pub struct GameSettings {
    pub blinds: Blinds,
    pub buy_in: Chips,
    pub max_seats: usize,
    pub min_players: usize,
    /// How long a player may sit on their turn before being folded.
    pub action_timeout: Duration,
    /// Cooldown after a hand before seats reopen.
    pub post_hand_delay: Duration,
    /// Pacing delay inserted before each phase flip.
    pub inter_state_delay: Duration,
    /// Countdown from the last seating before a hand starts.
    pub wait_for_players_timeout: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            blinds: Blinds::default(),
            buy_in: DEFAULT_BUY_IN,
            max_seats: MAX_SEATS,
            min_players: MIN_PLAYERS,
            action_timeout: Duration::from_secs(30),
            post_hand_delay: Duration::from_secs(5),
            inter_state_delay: Duration::from_secs(1),
            wait_for_players_timeout: Duration::from_secs(10),
        }
    }
}

/// Everything a table owns: seats, button and turn cursors, the board, the
/// pot, the card source, and pending events. Phases borrow this mutably
/// while they run; nothing outside the table ever touches it.
#[derive(Debug)]
pub struct TableData {
    pub settings: GameSettings,
    pub seats: Vec<Option<Player>>,
    pub button: SeatIndex,
    pub turn: SeatIndex,
    pub board: Vec<Card>,
    pub pot: Pot,
    pub events: VecDeque<GameEvent>,
    pub(crate) deck: Box<dyn CardSource>,
    pub(crate) last_seating: Option<Instant>,
    pub(crate) turn_deadline: Option<Instant>,
    /// Highest `bet_this_round` on the current street.
    pub(crate) current_bet: Chips,
}

impl TableData {
    fn new(settings: GameSettings, deck: Box<dyn CardSource>) -> Self {
        let seats = (0..settings.max_seats).map(|_| None).collect();
        Self {
            settings,
            seats,
            button: 0,
            turn: 0,
            board: Vec::with_capacity(5),
            pot: Pot::new(),
            events: VecDeque::new(),
            deck,
            last_seating: None,
            turn_deadline: None,
            current_bet: 0,
        }
    }

    #[must_use]
    pub fn seated_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    fn non_folded_count(&self) -> usize {
        self.seats.iter().flatten().filter(|p| !p.folded).count()
    }

    fn any_action_required(&self) -> bool {
        self.seats.iter().flatten().any(|p| p.action_required)
    }

    fn player_at(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }

    fn player_mut(&mut self, seat: SeatIndex) -> Result<&mut Player, InternalError> {
        self.seats
            .get_mut(seat)
            .and_then(Option::as_mut)
            .ok_or(InternalError::InvalidSeat(seat))
    }

    pub(crate) fn seat_of(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .flatten()
            .find(|p| &p.id == id)
            .map(|p| p.seat)
    }

    /// Next occupied seat scanning forward circularly. Empty seats are
    /// skipped; folded or all-in occupants are not, callers decide whether
    /// the occupant needs to act.
    fn player_after(&self, seat: SeatIndex) -> Result<SeatIndex, InternalError> {
        let n = self.seats.len();
        for step in 1..=n {
            let candidate = (seat + step) % n;
            if self.seats[candidate].is_some() {
                return Ok(candidate);
            }
        }
        Err(InternalError::Inconsistent("no occupied seats".into()))
    }

    fn advance_turn(&mut self) -> Result<(), InternalError> {
        let next = self.player_after(self.turn)?;
        self.turn = next;
        self.turn_deadline = Some(Instant::now() + self.settings.action_timeout);
        Ok(())
    }

    /// Move `amount` (capped at the player's stack) from the stack into the
    /// pot, flipping the all-in flag if the stack empties. Returns the
    /// amount actually moved.
    fn contribute(
        &mut self,
        seat: SeatIndex,
        amount: Chips,
        label: LastAction,
    ) -> Result<Chips, InternalError> {
        let player = self
            .seats
            .get_mut(seat)
            .and_then(Option::as_mut)
            .ok_or(InternalError::InvalidSeat(seat))?;
        let actual = amount.min(player.stack);
        if actual == 0 {
            return Ok(0);
        }
        player.stack -= actual;
        player.bet_this_round += actual;
        player.total_bet += actual;
        let all_in = player.stack == 0;
        player.all_in = all_in;
        player.last_action = if all_in { LastAction::AllIn } else { label };
        if all_in {
            player.action_required = false;
        }
        let id = player.id.clone();
        self.pot.add(&id, actual, all_in)?;
        Ok(actual)
    }

    /// Force the blind from the seat on turn, then pass the turn on. Seats
    /// folded out before the blinds (a player who left mid-hand) are
    /// skipped.
    fn post_blind(&mut self, amount: Chips) -> Result<(), InternalError> {
        for _ in 0..self.seats.len() {
            if self.player_at(self.turn).is_some_and(|p| !p.folded) {
                break;
            }
            self.advance_turn()?;
        }
        let seat = self.turn;
        let actual = self.contribute(seat, amount, LastAction::PostedBlind)?;
        let id = self
            .player_at(seat)
            .map(|p| p.id.clone())
            .ok_or(InternalError::InvalidSeat(seat))?;
        self.events.push_back(GameEvent::BlindPosted(id, actual));
        self.advance_turn()
    }

    /// Open a betting street: flag everyone who can still act, fix the bet
    /// to match, and start the turn clock. Post-flop streets reset the
    /// per-street bets and restart the rotation left of the button; pre-flop
    /// inherits the blinds and the turn position after the big blind.
    fn begin_street(&mut self, reset_bets: bool) -> Result<(), InternalError> {
        if reset_bets {
            for player in self.seats.iter_mut().flatten() {
                player.bet_this_round = 0;
            }
            self.current_bet = 0;
            let first = self.player_after(self.button)?;
            self.turn = first;
        } else {
            self.current_bet = self
                .seats
                .iter()
                .flatten()
                .map(|p| p.bet_this_round)
                .max()
                .unwrap_or(0);
        }
        // With at most one player able to act there is no betting to do and
        // the remaining streets just run out.
        let live = self.seats.iter().flatten().filter(|p| p.can_act()).count();
        if live > 1 || (!reset_bets && live == 1) {
            for player in self.seats.iter_mut().flatten() {
                if player.can_act() {
                    player.action_required = true;
                }
            }
        }
        self.turn_deadline = Some(Instant::now() + self.settings.action_timeout);
        Ok(())
    }

    /// Deal one hole card per seated player per pass, starting left of the
    /// button, twice.
    fn deal_hole_cards(&mut self) -> Result<(), InternalError> {
        for _ in 0..2 {
            let mut seat = self.player_after(self.button)?;
            for _ in 0..self.seated_count() {
                let card = self.deck.next_card()?;
                if let Some(player) = self.seats[seat].as_mut() {
                    player.hole_cards.push(card);
                }
                seat = self.player_after(seat)?;
            }
        }
        Ok(())
    }

    /// Burn one card, then deal `count` to the board.
    fn deal_board(&mut self, count: usize) -> Result<(), InternalError> {
        self.deck.next_card()?;
        for _ in 0..count {
            let card = self.deck.next_card()?;
            self.board.push(card);
        }
        self.events.push_back(GameEvent::BoardDealt(self.board.clone()));
        Ok(())
    }

    /// Walk the turn cursor to the next seat whose occupant owes an action.
    fn point_turn_at_pending_actor(&mut self) -> Result<(), InternalError> {
        for _ in 0..self.seats.len() {
            if self
                .player_at(self.turn)
                .is_some_and(|p| p.action_required)
            {
                return Ok(());
            }
            self.advance_turn()?;
        }
        Err(InternalError::Inconsistent(
            "no player awaiting action".into(),
        ))
    }

    fn timeout_fold_current(&mut self) -> Result<(), InternalError> {
        let seat = self.turn;
        let player = self.player_mut(seat)?;
        player.folded = true;
        player.action_required = false;
        player.last_action = LastAction::TimedOut;
        let id = player.id.clone();
        warn!("{id} timed out, folding");
        self.events.push_back(GameEvent::TimedOut(id));
        self.advance_turn()
    }
}

/// Phase hooks. `init` runs once on entry, `tick` runs every pulse and may
/// return the next phase, and `on_action` accepts voluntary player actions.
/// Phases without betting keep the default rejection.
#[enum_dispatch]
pub trait Phase {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError>;

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError>;

    fn on_action(
        &mut self,
        _data: &mut TableData,
        _player: &PlayerId,
        _action: Action,
    ) -> Result<(), GameError> {
        Err(GameError::ActionNotAllowed)
    }
}

/// The active phase of a table.
#[enum_dispatch(Phase)]
#[derive(Debug)]
pub enum TableState {
    WaitingPlayers,
    Initializing,
    ReadyToStart,
    PostingSmallBlind,
    PostingBigBlind,
    PreFlop,
    Flop,
    Turn,
    River,
    Done,
    Finished,
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::WaitingPlayers(_) => "waiting for players",
            Self::Initializing(_) => "initializing",
            Self::ReadyToStart(_) => "dealing",
            Self::PostingSmallBlind(_) => "posting small blind",
            Self::PostingBigBlind(_) => "posting big blind",
            Self::PreFlop(_) => "pre-flop",
            Self::Flop(_) => "flop",
            Self::Turn(_) => "turn",
            Self::River(_) => "river",
            Self::Done(_) => "showdown",
            Self::Finished(_) => "finished",
        };
        write!(f, "{repr}")
    }
}

impl Phase for WaitingPlayers {
    fn init(&mut self, _data: &mut TableData) -> Result<(), InternalError> {
        Ok(())
    }

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        let enough = data.seated_count() >= data.settings.min_players;
        let settled = data
            .last_seating
            .is_some_and(|at| at.elapsed() >= data.settings.wait_for_players_timeout);
        if enough && settled {
            return Ok(Some(Initializing::default().into()));
        }
        Ok(None)
    }
}

impl Phase for Initializing {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        let button = data.player_after(data.button)?;
        data.button = button;
        data.turn = data.player_after(button)?;
        for player in data.seats.iter_mut().flatten() {
            player.reset_for_hand();
        }
        data.board.clear();
        data.pot = Pot::new();
        data.current_bet = 0;
        data.deck.start_hand();
        debug!("hand starting, button at seat {button}");
        Ok(())
    }

    fn tick(&mut self, _data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        Ok(Some(ReadyToStart::default().into()))
    }
}

impl Phase for ReadyToStart {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        data.deal_hole_cards()
    }

    fn tick(&mut self, _data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        Ok(Some(PostingSmallBlind::default().into()))
    }
}

impl Phase for PostingSmallBlind {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        let amount = data.settings.blinds.small;
        data.post_blind(amount)
    }

    fn tick(&mut self, _data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        Ok(Some(PostingBigBlind::default().into()))
    }
}

impl Phase for PostingBigBlind {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        let amount = data.settings.blinds.big;
        data.post_blind(amount)
    }

    fn tick(&mut self, _data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        Ok(Some(PreFlop::default().into()))
    }
}

/// Tick shared by all four betting streets.
fn betting_tick(
    data: &mut TableData,
    next: TableState,
) -> Result<Option<TableState>, InternalError> {
    if data.non_folded_count() <= 1 {
        return Ok(Some(Done::default().into()));
    }
    if !data.any_action_required() {
        return Ok(Some(next));
    }
    data.point_turn_at_pending_actor()?;
    if data
        .turn_deadline
        .is_some_and(|deadline| Instant::now() >= deadline)
    {
        data.timeout_fold_current()?;
    }
    Ok(None)
}

/// Action handling shared by all four betting streets.
fn handle_betting_action(
    data: &mut TableData,
    id: &PlayerId,
    action: Action,
) -> Result<(), GameError> {
    let seat = data.seat_of(id).ok_or(GameError::NotSeated)?;
    if seat != data.turn {
        return Err(GameError::OutOfTurn);
    }
    let player = data.player_at(seat).ok_or(GameError::NotSeated)?;
    if !player.action_required {
        return Err(GameError::OutOfTurn);
    }
    let bet_this_round = player.bet_this_round;
    let stack = player.stack;

    match action {
        Action::Fold => {
            let player = data.player_mut(seat)?;
            player.folded = true;
            player.action_required = false;
            player.last_action = LastAction::Fold;
            data.events
                .push_back(GameEvent::ActionTaken(id.clone(), LastAction::Fold));
        }
        Action::Check => {
            if bet_this_round != data.current_bet {
                return Err(GameError::ActionNotAllowed);
            }
            let player = data.player_mut(seat)?;
            player.action_required = false;
            player.last_action = LastAction::Check;
            data.events
                .push_back(GameEvent::ActionTaken(id.clone(), LastAction::Check));
        }
        Action::Call => {
            let owed = data.current_bet.saturating_sub(bet_this_round);
            if owed > 0 {
                data.contribute(seat, owed, LastAction::Call)?;
            }
            let player = data.player_mut(seat)?;
            player.action_required = false;
            if owed == 0 {
                // Big-blind option with nothing to match checks through.
                player.last_action = LastAction::Check;
            }
            let recorded = player.last_action;
            data.events
                .push_back(GameEvent::ActionTaken(id.clone(), recorded));
        }
        Action::Bet(amount) => {
            let wagered = amount.min(stack);
            let new_bet = bet_this_round + wagered;
            let all_in = amount >= stack;
            let min_raise_to = data.current_bet + data.settings.blinds.big;
            if new_bet <= data.current_bet || (!all_in && new_bet < min_raise_to) {
                return Err(GameError::InvalidBet {
                    amount,
                    min: min_raise_to.saturating_sub(bet_this_round),
                });
            }
            data.contribute(seat, wagered, LastAction::Bet)?;
            data.current_bet = new_bet;
            // A raise reopens the action for everyone else still live.
            for other in data.seats.iter_mut().flatten() {
                if other.seat != seat && other.can_act() {
                    other.action_required = true;
                }
            }
            let player = data.player_mut(seat)?;
            player.action_required = false;
            let recorded = player.last_action;
            data.events
                .push_back(GameEvent::ActionTaken(id.clone(), recorded));
        }
    }

    data.advance_turn()?;
    Ok(())
}

impl Phase for PreFlop {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        data.begin_street(false)
    }

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        betting_tick(data, Flop::default().into())
    }

    fn on_action(
        &mut self,
        data: &mut TableData,
        player: &PlayerId,
        action: Action,
    ) -> Result<(), GameError> {
        handle_betting_action(data, player, action)
    }
}

impl Phase for Flop {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        data.deal_board(3)?;
        data.begin_street(true)
    }

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        betting_tick(data, Turn::default().into())
    }

    fn on_action(
        &mut self,
        data: &mut TableData,
        player: &PlayerId,
        action: Action,
    ) -> Result<(), GameError> {
        handle_betting_action(data, player, action)
    }
}

impl Phase for Turn {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        data.deal_board(1)?;
        data.begin_street(true)
    }

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        betting_tick(data, River::default().into())
    }

    fn on_action(
        &mut self,
        data: &mut TableData,
        player: &PlayerId,
        action: Action,
    ) -> Result<(), GameError> {
        handle_betting_action(data, player, action)
    }
}

impl Phase for River {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        data.deal_board(1)?;
        data.begin_street(true)
    }

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        betting_tick(data, Done::default().into())
    }

    fn on_action(
        &mut self,
        data: &mut TableData,
        player: &PlayerId,
        action: Action,
    ) -> Result<(), GameError> {
        handle_betting_action(data, player, action)
    }
}

impl Phase for Done {
    fn init(&mut self, data: &mut TableData) -> Result<(), InternalError> {
        let contenders: Vec<&Player> =
            data.seats.iter().flatten().filter(|p| !p.folded).collect();
        let tiers = if contenders.len() == 1 {
            // Uncontested, no evaluation needed.
            vec![vec![contenders[0].id.clone()]]
        } else {
            let entries: Vec<PlayerHand> = contenders
                .iter()
                .map(|p| {
                    let mut cards = p.hole_cards.clone();
                    cards.extend_from_slice(&data.board);
                    PlayerHand {
                        player: p.id.clone(),
                        cards,
                    }
                })
                .collect();
            rank_hands(&entries)?
        };

        let total = data.pot.total();
        data.pot.finalize(&tiers);
        let winnings: Vec<(PlayerId, Chips)> = data
            .pot
            .winnings()
            .map_err(|e| InternalError::Inconsistent(format!("pot unsettled after payout: {e}")))?
            .iter()
            .map(|(id, amount)| (id.clone(), *amount))
            .collect();

        let mut paid: Chips = 0;
        for (id, amount) in winnings {
            if let Some(seat) = data.seat_of(&id) {
                if let Some(player) = data.seats[seat].as_mut() {
                    player.stack += amount;
                }
            }
            paid += amount;
            info!("{id} won {amount}");
            data.events.push_back(GameEvent::Won(id, amount));
        }
        let unclaimed = total - paid;
        if unclaimed > 0 {
            data.events.push_back(GameEvent::PotUnclaimed(unclaimed));
        }
        data.events.push_back(GameEvent::HandFinished);
        Ok(())
    }

    fn tick(&mut self, _data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        Ok(Some(Finished::default().into()))
    }
}

impl Phase for Finished {
    fn init(&mut self, _data: &mut TableData) -> Result<(), InternalError> {
        self.since = Some(Instant::now());
        Ok(())
    }

    fn tick(&mut self, data: &mut TableData) -> Result<Option<TableState>, InternalError> {
        let elapsed = self
            .since
            .is_some_and(|at| at.elapsed() >= data.settings.post_hand_delay);
        if !elapsed {
            return Ok(None);
        }
        data.board.clear();
        data.pot = Pot::new();
        data.current_bet = 0;
        data.turn_deadline = None;
        for seat in 0..data.seats.len() {
            let busted = data.seats[seat].as_ref().is_some_and(|p| p.stack == 0);
            if busted {
                if let Some(player) = data.seats[seat].take() {
                    info!("{} busted, standing up", player.id);
                    data.events.push_back(GameEvent::StoodUp(player.id));
                }
            }
        }
        data.last_seating = Some(Instant::now());
        Ok(Some(WaitingPlayers::default().into()))
    }
}

/// A pending phase flip, held back by the pacing delay.
#[derive(Debug)]
struct PendingTransition {
    next: TableState,
    at: Instant,
}

/// A single poker table: data plus the active phase. All mutation happens
/// through [`tick`](Self::tick) and the message-style entry points; the
/// table is meant to be owned by exactly one task.
#[derive(Debug)]
pub struct Table {
    data: TableData,
    state: TableState,
    pending: Option<PendingTransition>,
}

impl Table {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_card_source(settings, Box::new(Deck::default()))
    }

    /// Build a table around a custom card source. Tests use this to inject
    /// scripted decks.
    #[must_use]
    pub fn with_card_source(settings: GameSettings, deck: Box<dyn CardSource>) -> Self {
        Self {
            data: TableData::new(settings, deck),
            state: WaitingPlayers::default().into(),
            pending: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &TableState {
        &self.state
    }

    #[must_use]
    pub fn data(&self) -> &TableData {
        &self.data
    }

    /// Advance the table by one scheduler pulse. An internal error here
    /// means the table is broken and should be closed by its supervisor.
    pub fn tick(&mut self) -> Result<(), InternalError> {
        if let Some(pending) = self.pending.take() {
            if Instant::now() >= pending.at {
                self.enter(pending.next)?;
            } else {
                self.pending = Some(pending);
                return Ok(());
            }
        }
        if let Some(next) = self.state.tick(&mut self.data)? {
            self.set_state(next)?;
        }
        Ok(())
    }

    fn set_state(&mut self, next: TableState) -> Result<(), InternalError> {
        let delay = self.data.settings.inter_state_delay;
        if delay.is_zero() {
            self.enter(next)
        } else {
            self.pending = Some(PendingTransition {
                next,
                at: Instant::now() + delay,
            });
            Ok(())
        }
    }

    fn enter(&mut self, mut next: TableState) -> Result<(), InternalError> {
        debug!("table entering {next}");
        next.init(&mut self.data)?;
        self.state = next;
        Ok(())
    }

    /// Seat a new player. Only possible between hands.
    pub fn add_player(&mut self, id: PlayerId, stack: Chips) -> Result<SeatIndex, GameError> {
        if !matches!(self.state, TableState::WaitingPlayers(_)) {
            return Err(GameError::GameInProgress);
        }
        if self.data.seat_of(&id).is_some() {
            return Err(GameError::AlreadySeated);
        }
        let seat = self
            .data
            .seats
            .iter()
            .position(Option::is_none)
            .ok_or(GameError::TableFull)?;
        info!("{id} seated at {seat}");
        self.data.seats[seat] = Some(Player::new(id.clone(), seat, stack));
        self.data.last_seating = Some(Instant::now());
        self.data.events.push_back(GameEvent::Seated(id));
        Ok(seat)
    }

    /// Stand a player up, returning their remaining stack. Chips already
    /// committed to the current hand stay in the pot. Mid-hand the player
    /// is folded out and keeps the seat until the end-of-hand sweep, so
    /// the rotation never lands on a vacant seat.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Chips, GameError> {
        let seat = self.data.seat_of(id).ok_or(GameError::NotSeated)?;
        if matches!(self.state, TableState::WaitingPlayers(_)) {
            let player = self.data.seats[seat].take().ok_or(GameError::NotSeated)?;
            info!("{id} left seat {seat}");
            self.data.events.push_back(GameEvent::StoodUp(id.clone()));
            return Ok(player.stack);
        }
        let player = self.data.seats[seat]
            .as_mut()
            .ok_or(GameError::NotSeated)?;
        player.folded = true;
        player.action_required = false;
        player.last_action = LastAction::Fold;
        let stack = player.stack;
        player.stack = 0;
        // The zeroed stack makes the end-of-hand sweep free the seat and
        // emit the stand-up event.
        info!("{id} left seat {seat} mid-hand");
        Ok(stack)
    }

    /// Submit a voluntary action for the current phase to judge.
    pub fn take_action(&mut self, id: &PlayerId, action: Action) -> Result<(), GameError> {
        self.state.on_action(&mut self.data, id, action)
    }

    #[must_use]
    pub fn available_to_join(&self) -> bool {
        self.data.seats.iter().any(Option::is_none)
    }

    /// Per-player snapshot. Hole cards are included only for the viewer's
    /// own seat.
    #[must_use]
    pub fn view_for(&self, viewer: Option<&PlayerId>) -> TableView {
        let players = self
            .data
            .seats
            .iter()
            .flatten()
            .map(|p| PlayerView {
                id: p.id.clone(),
                seat: p.seat,
                stack: p.stack,
                bet_this_round: p.bet_this_round,
                folded: p.folded,
                all_in: p.all_in,
                last_action: p.last_action,
                hole_cards: (viewer == Some(&p.id)).then(|| p.hole_cards.clone()),
            })
            .collect();
        TableView {
            state: self.state.to_string(),
            board: self.data.board.clone(),
            pot_total: self.data.pot.total(),
            blinds: self.data.settings.blinds.clone(),
            button: self.data.button,
            turn: self.data.player_at(self.data.turn).map(|p| p.id.clone()),
            players,
        }
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.data.events)
    }
}
