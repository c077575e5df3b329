use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A playing card.
///
/// Cards are ordered by [rank](Rank) first and [suit](Suit) second, see
/// [`Card::total_order()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// The suit of a [card](Card).
///
/// The order between suits only serves as a tiebreak when sorting cards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♣")]
    Clubs,
    #[serde(rename = "♠")]
    Spades,
}

/// The rank of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "2")]
    Two = 2,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// The numeric value, from 2 for a two up to 14 for an ace.
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// The one comparison between cards: rank first, suit as tiebreak.
    ///
    /// Used both for sorting and by [`Card::beats()`].
    pub fn total_order(&self, other: &Card) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.suit.cmp(&other.suit))
    }

    /// Whether this card covers `target` when `trump` is the trump suit.
    ///
    /// A card beats a card of its own suit with a lower rank, and a trump
    /// beats any non-trump. A trump can only be beaten by a higher trump.
    pub fn beats(&self, target: Card, trump: Suit) -> bool {
        if self.suit == target.suit {
            self.total_order(&target) == Ordering::Greater
        } else {
            self.suit == trump
        }
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_order(other)
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which cards make up the deck.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckVariant {
    /// Sixes up to aces, 36 cards.
    #[default]
    Short,
    /// Twos up to aces, 52 cards.
    Full,
}

impl DeckVariant {
    pub fn ranks(self) -> &'static [Rank] {
        match self {
            DeckVariant::Short => &Rank::ALL[4..],
            DeckVariant::Full => &Rank::ALL,
        }
    }

    pub fn len(self) -> usize {
        self.ranks().len() * Suit::ALL.len()
    }

    /// Every card of this variant, grouped by suit in ascending rank.
    pub fn cards(self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.len());
        for suit in Suit::ALL {
            for &rank in self.ranks() {
                cards.push(Card { rank, suit });
            }
        }
        cards
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidRank,
    InvalidSuit,
}

impl std::error::Error for CardFromStrErr {}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::LessThanTwoChars => write!(f, "A card code needs two characters"),
            CardFromStrErr::MoreThanTwoChars => write!(f, "A card code has only two characters"),
            CardFromStrErr::InvalidRank => write!(f, "Unknown rank, expected one of 23456789TJQKA"),
            CardFromStrErr::InvalidSuit => write!(f, "Unknown suit, expected one of ♥♦♣♠ or HDCS"),
        }
    }
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let rank_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        let suit_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        let rank = match rank_char.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(CardFromStrErr::InvalidRank),
        };
        let suit = match suit_char.to_ascii_uppercase() {
            '♥' | 'H' => Suit::Hearts,
            '♦' | 'D' => Suit::Diamonds,
            '♣' | 'C' => Suit::Clubs,
            '♠' | 'S' => Suit::Spades,
            _ => return Err(CardFromStrErr::InvalidSuit),
        };
        Ok(Card { rank, suit })
    }
}

/// Shorthand for creating cards from a two-character string.
///
/// The first character is the [rank](Rank) (note: 10 is `T`), the second is
/// the [suit](Suit) as a unicode character (♥, ♦, ♣, or ♠) or its ASCII
/// initial (H, D, C, S).
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use perdurak::{card, Card, Rank, Suit};
/// assert_eq!(
///     card!("T♥"),
///     Card { rank: Rank::Ten, suit: Suit::Hearts }
/// );
/// ```
#[macro_export]
macro_rules! card {
    ($rs:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($rs)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn order_is_rank_then_suit(a: Card, b: Card) -> bool {
            match a.rank.cmp(&b.rank) {
                Ordering::Equal => a.cmp(&b) == a.suit.cmp(&b.suit),
                ord => a.cmp(&b) == ord,
            }
        }
    }

    quickcheck! {
        fn trump_is_only_beaten_by_higher_trump(a: Card, b: Card) -> bool {
            let trump = b.suit;
            !a.beats(b, trump) || (a.suit == trump && a.rank > b.rank)
        }
    }

    #[test]
    fn beats_follows_suit_and_trump() {
        let trump = Suit::Spades;
        assert!(card!("9♥").beats(card!("8♥"), trump));
        assert!(!card!("8♥").beats(card!("8♥"), trump));
        assert!(!card!("7♥").beats(card!("8♥"), trump));
        assert!(card!("6♠").beats(card!("A♥"), trump));
        assert!(!card!("A♥").beats(card!("6♠"), trump));
        assert!(!card!("A♦").beats(card!("8♥"), trump));
        assert!(card!("7♠").beats(card!("6♠"), trump));
    }

    #[test]
    fn variant_sizes() {
        assert_eq!(DeckVariant::Short.len(), 36);
        assert_eq!(DeckVariant::Short.cards().len(), 36);
        assert_eq!(DeckVariant::Full.cards().len(), 52);
        assert!(DeckVariant::Short
            .cards()
            .iter()
            .all(|card| card.rank >= Rank::Six));
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(card!("TH"), Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(card!("q♠").to_string(), "Q♠");
        assert_eq!(card!("T♦").to_string(), "10♦");
        assert_eq!("7".parse::<Card>(), Err(CardFromStrErr::LessThanTwoChars));
        assert_eq!("7♥x".parse::<Card>(), Err(CardFromStrErr::MoreThanTwoChars));
        assert_eq!("1♥".parse::<Card>(), Err(CardFromStrErr::InvalidRank));
        assert_eq!("7X".parse::<Card>(), Err(CardFromStrErr::InvalidSuit));
    }

    #[test]
    fn rank_values() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ace.value(), 14);
    }

    #[test]
    fn serde_uses_symbols() {
        let json = serde_json::to_string(&card!("A♦")).unwrap();
        assert_eq!(json, r#"{"rank":"A","suit":"♦"}"#);
    }
}
