//! Pure functions for computing legal moves.
//!
//! All of them preserve the order of the given hand and return positions into
//! it, so that a caller can present choices with stable indices.

use crate::{Card, Suit, Table};

/// Positions of the cards in `hand` that may be added to the table as attack cards.
///
/// On an empty table any card may open the attack. Otherwise a card must
/// share its rank with some card on the table, covered or not.
pub fn legal_offense_indices(table: &Table, hand: &[Card]) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| table.is_empty() || table.has_rank(card.rank))
        .map(|(idx, _)| idx)
        .collect()
}

/// The cards in `hand` that may be added to the table as attack cards.
pub fn legal_offense_cards(table: &Table, hand: &[Card]) -> Vec<Card> {
    select(hand, legal_offense_indices(table, hand))
}

/// Positions of the cards in `hand` that cover `target`.
pub fn legal_defense_indices(target: Card, trump: Suit, hand: &[Card]) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| card.beats(target, trump))
        .map(|(idx, _)| idx)
        .collect()
}

/// The cards in `hand` that cover `target`.
pub fn legal_defense_cards(target: Card, trump: Suit, hand: &[Card]) -> Vec<Card> {
    select(hand, legal_defense_indices(target, trump, hand))
}

/// Positions of the cards in `hand` that could pass the attack on to the next seat.
///
/// A switch needs a card of the same rank as an uncovered table card, and is
/// only possible while no defense card has been played.
pub fn legal_switch_indices(table: &Table, hand: &[Card]) -> Vec<usize> {
    if table.has_defense() {
        return Vec::new();
    }
    hand.iter()
        .enumerate()
        .filter(|(_, card)| table.uncovered().any(|(_, tc)| tc.rank == card.rank))
        .map(|(idx, _)| idx)
        .collect()
}

/// How many more attack cards fit onto the table.
///
/// At most `attack_limit` attack cards may be played in a round, and the
/// uncovered cards may never outnumber the cards in the defender's hand.
pub fn attack_capacity(table: &Table, attack_limit: usize, defender_hand_len: usize) -> usize {
    let by_limit = attack_limit.saturating_sub(table.attack_count());
    let by_hand = defender_hand_len.saturating_sub(table.uncovered_count());
    by_limit.min(by_hand)
}

fn select(hand: &[Card], indices: Vec<usize>) -> Vec<Card> {
    indices.into_iter().map(|idx| hand[idx]).collect()
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::TableInput;
    use crate::card;

    quickcheck! {
        fn empty_table_allows_every_card(hand: Vec<Card>) -> bool {
            legal_offense_cards(&Table::new(), &hand) == hand
        }
    }

    quickcheck! {
        fn offense_matches_table_ranks_exhaustively(input: TableInput, hand: Vec<Card>) -> bool {
            let table = input.table;
            if table.is_empty() {
                return true;
            }
            let legal = legal_offense_indices(&table, &hand);
            hand.iter().enumerate().all(|(idx, card)| {
                let rank_on_table = table.cards().any(|tc| tc.rank == card.rank);
                rank_on_table == legal.contains(&idx)
            })
        }
    }

    quickcheck! {
        fn defense_never_undercuts(target: Card, trump: Suit, hand: Vec<Card>) -> bool {
            legal_defense_cards(target, trump, &hand).iter().all(|card| {
                let low_same_suit = card.suit == target.suit && card.rank <= target.rank;
                let non_trump_on_trump = target.suit == trump && card.suit != trump;
                !low_same_suit && !non_trump_on_trump
            })
        }
    }

    quickcheck! {
        fn results_keep_hand_order(target: Card, trump: Suit, hand: Vec<Card>) -> bool {
            let indices = legal_defense_indices(target, trump, &hand);
            indices.windows(2).all(|w| w[0] < w[1])
        }
    }

    #[test]
    fn trump_and_higher_cards_defend_a_non_trump_eight() {
        let hand = [card!("6♥"), card!("7♠"), card!("8♠"), card!("9♠"), card!("A♣"), card!("Q♠")];
        let trump = Suit::Hearts;
        assert_eq!(
            legal_defense_cards(card!("8♠"), trump, &hand),
            vec![card!("6♥"), card!("9♠"), card!("Q♠")]
        );
    }

    #[test]
    fn only_higher_trumps_beat_a_trump() {
        let hand = [card!("6♥"), card!("A♠"), card!("K♥")];
        assert_eq!(
            legal_defense_cards(card!("T♥"), Suit::Hearts, &hand),
            vec![card!("K♥")]
        );
    }

    #[test]
    fn offense_uses_covered_and_defense_ranks() {
        let mut table = Table::new();
        table.play_offense(card!("7♥"));
        table.play_defense(card!("J♥"), 0).unwrap();
        let hand = [card!("7♣"), card!("8♣"), card!("J♠"), card!("Q♦")];
        assert_eq!(legal_offense_cards(&table, &hand), vec![card!("7♣"), card!("J♠")]);
        assert_eq!(legal_offense_indices(&table, &hand), vec![0, 2]);
    }

    #[test]
    fn switch_needs_matching_rank_and_no_defense() {
        let mut table = Table::new();
        table.play_offense(card!("7♥"));
        let hand = [card!("7♣"), card!("8♣")];
        assert_eq!(legal_switch_indices(&table, &hand), vec![0]);

        table.play_offense(card!("7♦"));
        table.play_defense(card!("8♦"), 1).unwrap();
        assert_eq!(legal_switch_indices(&table, &hand), Vec::<usize>::new());
    }

    #[test]
    fn capacity_is_bounded_by_limit_and_defender_hand() {
        let mut table = Table::new();
        table.play_offense(card!("7♥"));
        table.play_offense(card!("7♣"));
        assert_eq!(attack_capacity(&table, 6, 6), 4);
        assert_eq!(attack_capacity(&table, 6, 3), 1);
        assert_eq!(attack_capacity(&table, 2, 6), 0);
        table.play_defense(card!("8♥"), 0).unwrap();
        // The covered card no longer counts against the defender's hand.
        assert_eq!(attack_capacity(&table, 6, 3), 2);
        assert_eq!(attack_capacity(&table, 6, 0), 0);
    }
}
