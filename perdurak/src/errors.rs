/// The error type for [`Table::play_defense()`](crate::Table::play_defense).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidTarget {
    OutOfRange { target: usize, table_len: usize },
    AlreadyCovered { target: usize },
}

impl std::error::Error for InvalidTarget {}

impl std::fmt::Display for InvalidTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTarget::OutOfRange { target, table_len } => write!(
                f,
                "Table position {} does not exist, there are {} cards on the table",
                target, table_len
            ),
            InvalidTarget::AlreadyCovered { target } => {
                write!(f, "The card at table position {} is already covered", target)
            }
        }
    }
}

/// The error type for one move, see [`Game::apply()`](crate::Game::apply).
///
/// A game that returned this error is unchanged, so the move can simply be
/// asked for again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidMove {
    /// The card is not in the hand of the acting seat.
    CardNotInHand,
    /// The defense target does not exist or is already covered.
    InvalidTarget(InvalidTarget),
    /// The move is not allowed in the current phase, or the card may not be
    /// played at this point.
    NotLegalForPhase,
    /// No more cards fit onto the table.
    CapacityExceeded,
}

impl std::error::Error for InvalidMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidMove::InvalidTarget(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMove::CardNotInHand => {
                write!(f, "Tried to play a card that was not in the player's hand")
            }
            InvalidMove::InvalidTarget(_) => write!(f, "Tried to cover an invalid table card"),
            InvalidMove::NotLegalForPhase => {
                write!(f, "This move is not allowed at this point of the round")
            }
            InvalidMove::CapacityExceeded => {
                write!(f, "The defender cannot receive any more cards this round")
            }
        }
    }
}

impl From<InvalidTarget> for InvalidMove {
    fn from(err: InvalidTarget) -> Self {
        InvalidMove::InvalidTarget(err)
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    TooFewSeats { num_seats: usize },
    TooManySeats { num_seats: usize },
    ZeroHandSize,
    ZeroAttackCards,
    FirstAttackerOutOfRange { seat: usize, num_seats: usize },
    NotEnoughCards { needed: usize, available: usize },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::TooFewSeats { num_seats } => {
                write!(f, "A game needs at least 2 seats, got {}", num_seats)
            }
            ConfigError::TooManySeats { num_seats } => {
                write!(f, "A game has at most 6 seats, got {}", num_seats)
            }
            ConfigError::ZeroHandSize => write!(f, "The hand size must be at least 1"),
            ConfigError::ZeroAttackCards => {
                write!(f, "At least one attack card per round must be allowed")
            }
            ConfigError::FirstAttackerOutOfRange { seat, num_seats } => write!(
                f,
                "The first attacker is seat {}, but there are only {} seats",
                seat, num_seats
            ),
            ConfigError::NotEnoughCards { needed, available } => write!(
                f,
                "Dealing needs {} cards, but only {} are available besides the trump",
                needed, available
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn invalid_target_is_the_source() {
        let err = InvalidMove::from(InvalidTarget::AlreadyCovered { target: 2 });
        let source = err.source().map(|src| src.to_string());
        assert_eq!(
            source.as_deref(),
            Some("The card at table position 2 is already covered")
        );
        assert!(InvalidMove::CapacityExceeded.source().is_none());
    }
}
