use serde::{Deserialize, Serialize};

use crate::{Card, Suit};

/// The cards held by one seat.
///
/// The cards are always kept sorted by [`Card::total_order()`], so indices
/// into a hand are stable between two moves of the same seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn insert(&mut self, card: Card) {
        let pos = self.cards.binary_search(&card).unwrap_or_else(|pos| pos);
        self.cards.insert(pos, card);
    }

    /// Removes `card`, returning whether it was in the hand.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.binary_search(&card) {
            Ok(pos) => {
                self.cards.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// The lowest-ranked card of `suit`, if any.
    pub fn lowest_of_suit(&self, suit: Suit) -> Option<Card> {
        self.cards.iter().copied().find(|card| card.suit == suit)
    }

    /// The cards ordered for display: non-trumps by rank, then trumps by rank.
    pub fn sorted_for_display(&self, trump: Suit) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.sort_by(|a, b| (a.suit == trump).cmp(&(b.suit == trump)).then(a.cmp(b)));
        cards
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
        self.cards.sort();
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut hand = Hand::new();
        hand.extend(iter);
        hand
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;

    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
