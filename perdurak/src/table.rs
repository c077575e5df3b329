use serde::{Deserialize, Serialize};

use crate::{Card, InvalidTarget, Rank};

/// A card that was played to the table during the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCard {
    pub card: Card,
    /// True for defense cards, and for attack cards once they were covered.
    pub covered: bool,
    /// For a defense card, the table position of the attack card it covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub covers: Option<usize>,
}

impl TableCard {
    pub fn is_attack(&self) -> bool {
        self.covers.is_none()
    }
}

/// The cards played in the current round, in the order they were played.
///
/// Positions in this sequence are used to address defense targets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    cards: Vec<TableCard>,
}

impl Table {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&TableCard> {
        self.cards.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableCard> {
        self.cards.iter()
    }

    /// Adds an uncovered attack card.
    pub fn play_offense(&mut self, card: Card) {
        self.cards.push(TableCard {
            card,
            covered: false,
            covers: None,
        });
    }

    /// Covers the card at `target` with `card`.
    ///
    /// On error, the table is unchanged.
    pub fn play_defense(&mut self, card: Card, target: usize) -> Result<(), InvalidTarget> {
        self.check_target(target)?;
        self.cards[target].covered = true;
        self.cards.push(TableCard {
            card,
            covered: true,
            covers: Some(target),
        });
        Ok(())
    }

    /// Checks that `target` is an uncovered card on the table.
    pub fn check_target(&self, target: usize) -> Result<Card, InvalidTarget> {
        match self.cards.get(target) {
            None => Err(InvalidTarget::OutOfRange {
                target,
                table_len: self.cards.len(),
            }),
            Some(table_card) if table_card.covered => {
                Err(InvalidTarget::AlreadyCovered { target })
            }
            Some(table_card) => Ok(table_card.card),
        }
    }

    /// Whether every card on the table is covered.
    ///
    /// This is vacuously true for an empty table, which callers must check
    /// separately.
    pub fn all_covered(&self) -> bool {
        self.cards.iter().all(|table_card| table_card.covered)
    }

    pub fn uncovered_count(&self) -> usize {
        self.cards.iter().filter(|table_card| !table_card.covered).count()
    }

    /// The uncovered cards together with their table positions.
    pub fn uncovered(&self) -> impl Iterator<Item = (usize, Card)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, table_card)| !table_card.covered)
            .map(|(idx, table_card)| (idx, table_card.card))
    }

    /// The number of attack cards, covered or not.
    pub fn attack_count(&self) -> usize {
        self.cards.iter().filter(|table_card| table_card.is_attack()).count()
    }

    /// Whether any defense card has been played.
    pub fn has_defense(&self) -> bool {
        self.cards.iter().any(|table_card| !table_card.is_attack())
    }

    pub fn has_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|table_card| table_card.card.rank == rank)
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().map(|table_card| table_card.card)
    }

    /// Removes all cards so they can go into the hand of the defender.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
            .into_iter()
            .map(|table_card| table_card.card)
            .collect()
    }

    /// Discards all cards from play and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let num_cards = self.cards.len();
        self.cards.clear();
        num_cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    #[test]
    fn defense_covers_the_target() {
        let mut table = Table::new();
        table.play_offense(card!("7♥"));
        table.play_offense(card!("7♣"));
        assert_eq!(table.uncovered_count(), 2);
        assert!(!table.all_covered());

        table.play_defense(card!("9♥"), 0).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.uncovered_count(), 1);
        assert_eq!(table.attack_count(), 2);
        assert!(table.has_defense());
        assert_eq!(table.uncovered().collect::<Vec<_>>(), vec![(1, card!("7♣"))]);
        assert_eq!(table.get(2).and_then(|tc| tc.covers), Some(0));

        table.play_defense(card!("8♣"), 1).unwrap();
        assert!(table.all_covered());
    }

    #[test]
    fn invalid_targets_leave_the_table_unchanged() {
        let mut table = Table::new();
        table.play_offense(card!("7♥"));
        table.play_defense(card!("9♥"), 0).unwrap();
        let before = table.clone();

        assert_eq!(
            table.play_defense(card!("T♥"), 0),
            Err(InvalidTarget::AlreadyCovered { target: 0 })
        );
        // The defense card itself is covered too.
        assert_eq!(
            table.play_defense(card!("T♥"), 1),
            Err(InvalidTarget::AlreadyCovered { target: 1 })
        );
        assert_eq!(
            table.play_defense(card!("T♥"), 5),
            Err(InvalidTarget::OutOfRange {
                target: 5,
                table_len: 2
            })
        );
        assert_eq!(table, before);
    }

    #[test]
    fn empty_table_is_vacuously_covered() {
        let table = Table::new();
        assert!(table.is_empty());
        assert!(table.all_covered());
        assert_eq!(table.uncovered_count(), 0);
    }

    #[test]
    fn take_all_and_clear_empty_the_table() {
        let mut table = Table::new();
        table.play_offense(card!("7♥"));
        table.play_defense(card!("9♥"), 0).unwrap();
        assert!(table.has_rank(Rank::Nine));
        assert_eq!(table.clone().take_all(), vec![card!("7♥"), card!("9♥")]);
        assert_eq!(table.clear(), 2);
        assert!(table.is_empty());
    }
}
