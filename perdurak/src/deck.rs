use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{Card, DeckVariant, Suit};

/// Puts cards into a random order.
///
/// Every [`rand::Rng`] is a `Shuffler` that produces a uniformly random
/// permutation (Fisher-Yates). Nothing else in the engine is random.
pub trait Shuffler {
    fn shuffle(&mut self, cards: &mut [Card]);
}

impl<R: rand::Rng + ?Sized> Shuffler for R {
    fn shuffle(&mut self, cards: &mut [Card]) {
        SliceRandom::shuffle(cards, self);
    }
}

/// Leaves the cards in the order they came in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShuffle;

impl Shuffler for NoShuffle {
    fn shuffle(&mut self, _cards: &mut [Card]) {}
}

/// The draw pile plus the trump card that was set aside.
///
/// The trump card is the last card to be drawn: it is handed out only once
/// the pile itself is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    // The top of the pile is the end of the vector.
    pile: Vec<Card>,
    trump: Card,
    trump_drawn: bool,
}

impl Deck {
    /// Shuffles all cards of `variant` and sets aside the trump.
    pub fn new<S: Shuffler + ?Sized>(variant: DeckVariant, shuffler: &mut S) -> Self {
        let mut cards = variant.cards();
        shuffler.shuffle(&mut cards);
        // The bottom card of the shuffled pile becomes the trump.
        let trump = cards.remove(0);
        Self {
            pile: cards,
            trump,
            trump_drawn: false,
        }
    }

    /// A deck in a known order, with the top of the pile at the end of `pile`.
    pub fn stacked(pile: Vec<Card>, trump: Card) -> Self {
        Self {
            pile,
            trump,
            trump_drawn: false,
        }
    }

    pub fn trump(&self) -> Card {
        self.trump
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    /// Whether the trump card is still waiting at the bottom of the deck.
    pub fn trump_in_deck(&self) -> bool {
        !self.trump_drawn
    }

    /// The number of cards in the draw pile, not counting the trump.
    pub fn len(&self) -> usize {
        self.pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    /// The number of cards that can still be drawn, including the trump.
    pub fn remaining(&self) -> usize {
        self.pile.len() + usize::from(!self.trump_drawn)
    }

    /// No card, not even the trump, is left to draw.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Draws up to `n` cards from the top, in drawing order.
    ///
    /// Returns fewer cards (possibly none) when the deck runs out.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.pile.len());
        let mut drawn = self.pile.split_off(self.pile.len() - take);
        drawn.reverse();
        if drawn.len() < n && !self.trump_drawn {
            self.trump_drawn = true;
            drawn.push(self.trump);
        }
        drawn
    }

    /// The cards still in the pile, from the bottom to the top.
    pub fn pile(&self) -> &[Card] {
        &self.pile
    }
}
