use serde::{Deserialize, Serialize};

use crate::{Card, GameOutcome, Phase, Table};

/// A move by the seat that is currently asked to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Add an attack card to the table.
    Attack { card: Card },
    /// Cover the uncovered table card at position `target`.
    Defend { card: Card, target: usize },
    /// Pass the attack on to the next seat by adding a card of the same rank.
    Switch { card: Card },
    /// As attacker: stop adding cards. As defender: take all table cards.
    Decline,
}

/// The hand cards that can cover one table card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseOption {
    /// Position on the table.
    pub target: usize,
    /// Positions in the requesting seat's hand.
    pub cards: Vec<usize>,
}

/// Everything a seat may know when it has to make a decision.
///
/// Other seats' hands are only given as counts. All option lists hold
/// positions in `hand`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub seat: usize,
    pub phase: Phase,
    pub hand: Vec<Card>,
    pub table: Table,
    pub trump: Card,
    /// Cards left to draw, including the trump card while it is still in the deck.
    pub deck_remaining: usize,
    pub hand_sizes: Vec<usize>,
    pub attacker: usize,
    pub defender: usize,
    pub can_decline: bool,
    pub attack_options: Vec<usize>,
    pub defense_options: Vec<DefenseOption>,
    pub switch_options: Vec<usize>,
}

impl MoveRequest {
    /// The action for playing the card at `hand_idx` as an attack.
    pub fn attack(&self, hand_idx: usize) -> Option<Action> {
        let card = *self.hand.get(hand_idx)?;
        Some(Action::Attack { card })
    }

    pub fn defend(&self, hand_idx: usize, target: usize) -> Option<Action> {
        let card = *self.hand.get(hand_idx)?;
        Some(Action::Defend { card, target })
    }

    pub fn switch(&self, hand_idx: usize) -> Option<Action> {
        let card = *self.hand.get(hand_idx)?;
        Some(Action::Switch { card })
    }

    /// All legal actions, in the order attack, defend, switch, decline.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .attack_options
            .iter()
            .filter_map(|&idx| self.attack(idx))
            .collect();
        for option in &self.defense_options {
            actions.extend(
                option
                    .cards
                    .iter()
                    .filter_map(|&idx| self.defend(idx, option.target)),
            );
        }
        actions.extend(self.switch_options.iter().filter_map(|&idx| self.switch(idx)));
        if self.can_decline {
            actions.push(Action::Decline);
        }
        actions
    }
}

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        seat: usize,
        num_seats: usize,
        trump: Card,
    },
    /// Request to make a move.
    ///
    /// The response should be an [`Action`].
    Decide(MoveRequest),
    /// The game is over.
    ///
    /// The response should be an [`Okay`].
    GameOver { outcome: GameOutcome },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();
