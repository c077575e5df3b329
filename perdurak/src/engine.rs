//! The turn state machine.
//!
//! A [`Game`] owns all game state. Callers ask it for the pending decision
//! with [`Game::request()`] and answer with [`Game::apply()`]; between those
//! two calls nothing happens. A move that is rejected leaves the game
//! exactly as it was.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::move_checker::{
    attack_capacity, legal_defense_indices, legal_offense_indices, legal_switch_indices,
};
use crate::{
    Action, Card, ConfigError, Deck, DefenseOption, FirstAttacker, GameConfig, Hand, InvalidMove,
    MoveRequest, Shuffler, Table,
};

/// Where the game currently is in the round cycle.
///
/// Between two calls to [`Game::apply()`] the phase is always
/// [`Attacking`](Phase::Attacking), [`Defending`](Phase::Defending) or
/// [`GameOver`](Phase::GameOver); the other phases are passed through while a
/// move is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Phase {
    RoundStart,
    Attacking { seat: usize },
    Defending { seat: usize },
    SwitchAttack { from: usize, to: usize },
    Resolving,
    RoundEnd,
    GameOver,
}

/// The part a seat plays in the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Attacker,
    Defender,
    Bystander,
    /// The seat has no cards left and nothing to draw.
    Out,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    pub hand: Hand,
    pub out: bool,
}

/// Flags and limits that live for one round only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// The defender passed the attack on at least once.
    pub table_was_switched: bool,
    /// The table was discarded after a successful defense.
    pub table_was_cleared: bool,
    /// The most attack cards the current defender can receive this round.
    pub attack_limit: usize,
    // Seats that may still add attack cards before the defender acts again.
    // The front is the seat that is asked.
    attack_queue: VecDeque<usize>,
}

/// The complete state of a game.
///
/// Only the [`Game`] that owns it changes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub deck: Deck,
    pub table: Table,
    pub seats: Vec<SeatState>,
    pub attacker: usize,
    pub defender: usize,
    pub round: RoundState,
    pub round_number: usize,
    /// The number of cards that left play on a successful defense.
    pub discarded: usize,
    /// Seats in the order in which they got rid of all their cards.
    pub finish_order: Vec<usize>,
}

impl GameState {
    pub fn role(&self, seat: usize) -> Role {
        if self.seats[seat].out {
            Role::Out
        } else if seat == self.attacker {
            Role::Attacker
        } else if seat == self.defender {
            Role::Defender
        } else {
            Role::Bystander
        }
    }

    pub fn active_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| !seat.out)
            .map(|(idx, _)| idx)
    }

    /// The first seat that is still in the game, starting at `seat` itself.
    fn next_active_from(&self, seat: usize) -> usize {
        let n = self.seats.len();
        (0..n)
            .map(|offset| (seat + offset) % n)
            .find(|&idx| !self.seats[idx].out)
            .unwrap_or(seat)
    }

    /// The next seat clockwise that is still in the game.
    fn next_active_after(&self, seat: usize) -> usize {
        self.next_active_from((seat + 1) % self.seats.len())
    }

    /// The active seats other than the defender, clockwise from the attacker.
    fn attack_order(&self) -> VecDeque<usize> {
        let n = self.seats.len();
        (0..n)
            .map(|offset| (self.attacker + offset) % n)
            .filter(|&idx| idx != self.defender && !self.seats[idx].out)
            .collect()
    }

    fn capacity(&self) -> usize {
        attack_capacity(
            &self.table,
            self.round.attack_limit,
            self.seats[self.defender].hand.len(),
        )
    }

    fn has_attack_move(&self, seat: usize) -> bool {
        seat != self.defender
            && self.capacity() > 0
            && !legal_offense_indices(&self.table, self.seats[seat].hand.as_slice()).is_empty()
    }
}

/// How a round ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: usize,
    pub attacker: usize,
    pub defender: usize,
    /// True if the table was discarded, false if the defender took the cards.
    pub defended: bool,
    pub switched: bool,
    pub cards_taken: usize,
}

/// The result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Seats in the order in which they emptied their hands.
    pub finish_order: Vec<usize>,
    /// The seat left holding cards. `None` means a draw.
    pub durak: Option<usize>,
}

impl GameOutcome {
    pub fn is_draw(&self) -> bool {
        self.durak.is_none()
    }

    /// Every seat that is not the durak.
    pub fn winners(&self) -> &[usize] {
        &self.finish_order
    }
}

/// Summarizes the outcome of applying a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The round goes on.
    Continue,
    /// The round ended and the next one has started.
    RoundEnded(RoundSummary),
    GameOver(GameOutcome),
}

/// A read-only picture of the whole game, for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub deck_len: usize,
    pub trump_in_deck: bool,
    pub trump: Card,
    /// Every hand, trumps last.
    pub hands: Vec<Vec<Card>>,
    pub roles: Vec<Role>,
    pub table: Table,
    pub attacker: usize,
    pub defender: usize,
    pub phase: Phase,
    pub round: usize,
    pub discarded: usize,
}

/// A single game, from the deal to the durak.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    phase: Phase,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Shuffles a new deck, deals, and starts the first round.
    pub fn new<S: Shuffler + ?Sized>(config: GameConfig, shuffler: &mut S) -> Result<Self, ConfigError> {
        config.validate()?;
        let deck = Deck::new(config.variant, shuffler);
        Self::with_deck(config, deck)
    }

    /// Starts a game with a prepared deck.
    ///
    /// The deck may hold fewer cards than the variant, e.g. to set up an endgame.
    pub fn with_deck(config: GameConfig, mut deck: Deck) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats: Vec<SeatState> = (0..config.num_seats)
            .map(|_| SeatState {
                hand: Hand::from_iter(deck.draw(config.hand_size)),
                out: false,
            })
            .collect();

        let first_attacker = match config.first_attacker {
            FirstAttacker::Seat(seat) => seat,
            FirstAttacker::LowestTrump => {
                let trump = deck.trump_suit();
                seats
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, seat)| seat.hand.lowest_of_suit(trump).map(|card| (card, idx)))
                    .min()
                    .map(|(_, idx)| idx)
                    .unwrap_or(0)
            }
        };
        debug!(trump = %deck.trump(), first_attacker, "Dealt cards");

        let mut game = Self {
            config,
            state: GameState {
                deck,
                table: Table::new(),
                seats,
                attacker: first_attacker,
                defender: first_attacker,
                round: RoundState::default(),
                round_number: 0,
                discarded: 0,
                finish_order: Vec::new(),
            },
            phase: Phase::RoundStart,
            outcome: None,
        };
        // A stacked deck can be too small to give everybody cards
        match game.retire_empty_seats() {
            Some(outcome) => game.end_game(outcome),
            None => game.start_round(first_attacker),
        }
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// All cards in play: deck (including an undrawn trump), hands, table, and discard.
    pub fn card_count(&self) -> usize {
        let state = &self.state;
        state.deck.remaining()
            + state.seats.iter().map(|seat| seat.hand.len()).sum::<usize>()
            + state.table.len()
            + state.discarded
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let trump = state.deck.trump_suit();
        Snapshot {
            deck_len: state.deck.len(),
            trump_in_deck: state.deck.trump_in_deck(),
            trump: state.deck.trump(),
            hands: state
                .seats
                .iter()
                .map(|seat| seat.hand.sorted_for_display(trump))
                .collect(),
            roles: (0..state.seats.len()).map(|seat| state.role(seat)).collect(),
            table: state.table.clone(),
            attacker: state.attacker,
            defender: state.defender,
            phase: self.phase,
            round: state.round_number,
            discarded: state.discarded,
        }
    }

    /// The decision the game is waiting for, or `None` once the game is over.
    pub fn request(&self) -> Option<MoveRequest> {
        let state = &self.state;
        let seat = match self.phase {
            Phase::Attacking { seat } | Phase::Defending { seat } => seat,
            _ => return None,
        };
        let hand = state.seats[seat].hand.as_slice();
        let trump = state.deck.trump_suit();

        let mut request = MoveRequest {
            seat,
            phase: self.phase,
            hand: hand.to_vec(),
            table: state.table.clone(),
            trump: state.deck.trump(),
            deck_remaining: state.deck.remaining(),
            hand_sizes: state.seats.iter().map(|seat| seat.hand.len()).collect(),
            attacker: state.attacker,
            defender: state.defender,
            can_decline: true,
            attack_options: Vec::new(),
            defense_options: Vec::new(),
            switch_options: Vec::new(),
        };
        if let Phase::Attacking { .. } = self.phase {
            // The opening attack can't be declined
            request.can_decline = !state.table.is_empty();
            if state.capacity() > 0 {
                request.attack_options = legal_offense_indices(&state.table, hand);
            }
        } else {
            request.defense_options = state
                .table
                .uncovered()
                .map(|(target, card)| DefenseOption {
                    target,
                    cards: legal_defense_indices(card, trump, hand),
                })
                .collect();
            if self.config.allow_switch {
                request.switch_options = legal_switch_indices(&state.table, hand)
                    .into_iter()
                    .filter(|&idx| self.check_switch(hand[idx]).is_ok())
                    .collect();
            }
        }
        Some(request)
    }

    /// Applies the move of the seat that is asked to act.
    ///
    /// On error, nothing has changed and the same decision is pending.
    pub fn apply(&mut self, action: Action) -> Result<TurnOutcome, InvalidMove> {
        match (self.phase, action) {
            (Phase::Attacking { seat }, Action::Attack { card }) => self.attack(seat, card),
            (Phase::Attacking { seat }, Action::Decline) => {
                if self.state.table.is_empty() {
                    return Err(InvalidMove::NotLegalForPhase);
                }
                trace!(seat, "Stops attacking");
                self.state.round.attack_queue.pop_front();
                Ok(self.advance_attack())
            }
            (Phase::Defending { seat }, Action::Defend { card, target }) => {
                self.defend(seat, card, target)
            }
            (Phase::Defending { seat }, Action::Switch { card }) => self.switch(seat, card),
            (Phase::Defending { seat }, Action::Decline) => {
                let cards = self.state.table.take_all();
                let cards_taken = cards.len();
                trace!(seat, cards_taken, "Takes the table");
                self.state.seats[seat].hand.extend(cards);
                Ok(self.finish_round(false, cards_taken))
            }
            _ => Err(InvalidMove::NotLegalForPhase),
        }
    }

    fn attack(&mut self, seat: usize, card: Card) -> Result<TurnOutcome, InvalidMove> {
        let state = &mut self.state;
        if !state.seats[seat].hand.contains(card) {
            return Err(InvalidMove::CardNotInHand);
        }
        if !state.table.is_empty() && !state.table.has_rank(card.rank) {
            return Err(InvalidMove::NotLegalForPhase);
        }
        if state.capacity() == 0 {
            return Err(InvalidMove::CapacityExceeded);
        }
        trace!(seat, card = %card, "Attacks");
        state.seats[seat].hand.remove(card);
        state.table.play_offense(card);
        Ok(self.advance_attack())
    }

    fn defend(&mut self, seat: usize, card: Card, target: usize) -> Result<TurnOutcome, InvalidMove> {
        let state = &mut self.state;
        if !state.seats[seat].hand.contains(card) {
            return Err(InvalidMove::CardNotInHand);
        }
        let target_card = state.table.check_target(target)?;
        if !card.beats(target_card, state.deck.trump_suit()) {
            return Err(InvalidMove::NotLegalForPhase);
        }
        trace!(seat, card = %card, target = %target_card, "Covers");
        state.table.play_defense(card, target)?;
        state.seats[seat].hand.remove(card);

        if state.table.all_covered() {
            // Everybody gets another chance to add cards
            state.round.attack_queue = state.attack_order();
            Ok(self.advance_attack())
        } else {
            Ok(TurnOutcome::Continue)
        }
    }

    /// Checks whether the defender could pass the attack on with `card`,
    /// returning the new defender.
    fn check_switch(&self, card: Card) -> Result<usize, InvalidMove> {
        let state = &self.state;
        if !self.config.allow_switch || state.table.has_defense() {
            return Err(InvalidMove::NotLegalForPhase);
        }
        if !state.table.uncovered().any(|(_, tc)| tc.rank == card.rank) {
            return Err(InvalidMove::NotLegalForPhase);
        }
        let new_defender = state.next_active_after(state.defender);
        let new_defender_hand = state.seats[new_defender].hand.len();
        let limit = self.config.max_attack_cards.min(new_defender_hand);
        if state.table.attack_count() + 1 > limit
            || state.table.uncovered_count() + 1 > new_defender_hand
        {
            return Err(InvalidMove::CapacityExceeded);
        }
        Ok(new_defender)
    }

    fn switch(&mut self, seat: usize, card: Card) -> Result<TurnOutcome, InvalidMove> {
        if !self.state.seats[seat].hand.contains(card) {
            return Err(InvalidMove::CardNotInHand);
        }
        let new_defender = self.check_switch(card)?;
        self.set_phase(Phase::SwitchAttack {
            from: seat,
            to: new_defender,
        });
        let state = &mut self.state;
        state.seats[seat].hand.remove(card);
        state.table.play_offense(card);
        state.attacker = seat;
        state.defender = new_defender;
        state.round.table_was_switched = true;
        state.round.attack_limit = self
            .config
            .max_attack_cards
            .min(state.seats[new_defender].hand.len());
        state.round.attack_queue.clear();
        self.set_phase(Phase::Defending { seat: new_defender });
        Ok(TurnOutcome::Continue)
    }

    /// Moves on to the next seat that can add attack cards, or to the
    /// defender, or resolves the round.
    fn advance_attack(&mut self) -> TurnOutcome {
        while let Some(&seat) = self.state.round.attack_queue.front() {
            if self.state.has_attack_move(seat) {
                self.set_phase(Phase::Attacking { seat });
                return TurnOutcome::Continue;
            }
            self.state.round.attack_queue.pop_front();
        }
        if self.state.table.uncovered_count() > 0 {
            let defender = self.state.defender;
            self.set_phase(Phase::Defending { seat: defender });
            return TurnOutcome::Continue;
        }
        self.set_phase(Phase::Resolving);
        self.state.discarded += self.state.table.clear();
        self.state.round.table_was_cleared = true;
        self.finish_round(true, 0)
    }

    fn finish_round(&mut self, defended: bool, cards_taken: usize) -> TurnOutcome {
        self.set_phase(Phase::RoundEnd);
        let summary = RoundSummary {
            round: self.state.round_number,
            attacker: self.state.attacker,
            defender: self.state.defender,
            defended,
            switched: self.state.round.table_was_switched,
            cards_taken,
        };
        debug!(
            round = summary.round,
            defended, cards_taken, "Round ended"
        );

        // Attackers draw first, the defender last
        let mut draw_order = Vec::from(self.state.attack_order());
        draw_order.push(self.state.defender);
        for seat in draw_order {
            let missing = self
                .config
                .hand_size
                .saturating_sub(self.state.seats[seat].hand.len());
            let drawn = self.state.deck.draw(missing);
            self.state.seats[seat].hand.extend(drawn);
        }

        if let Some(outcome) = self.retire_empty_seats() {
            self.end_game(outcome.clone());
            return TurnOutcome::GameOver(outcome);
        }

        let next_attacker = if defended {
            self.state.defender
        } else {
            self.state.next_active_after(self.state.defender)
        };
        self.start_round(next_attacker);
        TurnOutcome::RoundEnded(summary)
    }

    /// Takes seats without cards out of the rotation once the deck is exhausted.
    ///
    /// Returns the outcome if at most one seat is left.
    fn retire_empty_seats(&mut self) -> Option<GameOutcome> {
        let state = &mut self.state;
        if !state.deck.is_exhausted() {
            return None;
        }
        let n = state.seats.len();
        for offset in 0..n {
            let seat = (state.attacker + offset) % n;
            let seat_state = &mut state.seats[seat];
            if !seat_state.out && seat_state.hand.is_empty() {
                seat_state.out = true;
                state.finish_order.push(seat);
                debug!(seat, "Seat is out of cards");
            }
        }
        let mut active = state.active_seats();
        match (active.next(), active.next()) {
            (_, Some(_)) => None,
            (durak, None) => Some(GameOutcome {
                finish_order: state.finish_order.clone(),
                durak,
            }),
        }
    }

    fn start_round(&mut self, candidate: usize) {
        self.set_phase(Phase::RoundStart);
        let state = &mut self.state;
        state.round_number += 1;
        state.attacker = state.next_active_from(candidate);
        state.defender = state.next_active_after(state.attacker);
        state.round = RoundState {
            table_was_switched: false,
            table_was_cleared: false,
            attack_limit: self
                .config
                .max_attack_cards
                .min(state.seats[state.defender].hand.len()),
            attack_queue: VecDeque::from([state.attacker]),
        };
        debug!(
            round = state.round_number,
            attacker = state.attacker,
            defender = state.defender,
            "Round started"
        );
        let attacker = state.attacker;
        self.set_phase(Phase::Attacking { seat: attacker });
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        debug!(durak = ?outcome.durak, finish_order = ?outcome.finish_order, "Game over");
        self.outcome = Some(outcome);
        self.set_phase(Phase::GameOver);
    }

    fn set_phase(&mut self, phase: Phase) {
        trace!(?phase, "Phase");
        self.phase = phase;
    }
}
