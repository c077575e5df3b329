use quickcheck::{Arbitrary, Gen};

use crate::{Card, Rank, Suit, Table};

/// A table in some mid-round state: a few attack cards, some of them covered.
#[derive(Clone, Debug)]
pub struct TableInput {
    pub table: Table,
}

impl Arbitrary for TableInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut table = Table::new();
        let num_attacks = usize::arbitrary(g) % 7;
        for _ in 0..num_attacks {
            table.play_offense(Card::arbitrary(g));
        }
        for target in 0..num_attacks {
            if bool::arbitrary(g) {
                // Legality of the defense card doesn't matter for the table itself
                table
                    .play_defense(Card::arbitrary(g), target)
                    .expect("attack cards are uncovered before this loop");
            }
        }
        TableInput { table }
    }
}

impl Arbitrary for Suit {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Suit::ALL).unwrap()
    }
}

impl Arbitrary for Rank {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Rank::ALL).unwrap()
    }
}

impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            rank: Rank::arbitrary(g),
            suit: Suit::arbitrary(g),
        }
    }
}
