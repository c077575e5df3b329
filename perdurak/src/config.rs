use serde::{Deserialize, Serialize};

use crate::{ConfigError, DeckVariant};

pub const MAX_SEATS: usize = 6;

/// Who opens the first round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstAttacker {
    Seat(usize),
    /// The seat holding the lowest trump after the deal, or seat 0 if nobody has one.
    LowestTrump,
}

/// The rules of a single game.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: DeckVariant,
    pub num_seats: usize,
    /// Hands are topped up to this many cards after every round.
    pub hand_size: usize,
    /// The most attack cards in one round, before the defender's hand size is considered.
    pub max_attack_cards: usize,
    pub first_attacker: FirstAttacker,
    /// Whether the defender may pass the attack on to the next seat.
    pub allow_switch: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: DeckVariant::Short,
            num_seats: 2,
            hand_size: 6,
            max_attack_cards: 6,
            first_attacker: FirstAttacker::Seat(0),
            allow_switch: true,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let num_seats = self.num_seats;
        if num_seats < 2 {
            return Err(ConfigError::TooFewSeats { num_seats });
        }
        if num_seats > MAX_SEATS {
            return Err(ConfigError::TooManySeats { num_seats });
        }
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        if self.max_attack_cards == 0 {
            return Err(ConfigError::ZeroAttackCards);
        }
        if let FirstAttacker::Seat(seat) = self.first_attacker {
            if seat >= num_seats {
                return Err(ConfigError::FirstAttackerOutOfRange { seat, num_seats });
            }
        }
        let needed = num_seats * self.hand_size;
        let available = self.variant.len() - 1;
        if needed > available {
            return Err(ConfigError::NotEnoughCards { needed, available });
        }
        Ok(())
    }
}
