use perdurak::{Action, Card, MoveRequest};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::Bot;

/// Plays a uniformly random legal action.
pub struct RandomBot<R> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, request: &MoveRequest) -> Action {
        request
            .legal_actions()
            .choose(&mut self.rng)
            .copied()
            // Declining is always possible when there is nothing else
            .unwrap_or(Action::Decline)
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn new_game(&mut self, _seat: usize, _num_seats: usize, _trump: Card) {}

    fn attack(&mut self, request: &MoveRequest) -> Action {
        self.pick(request)
    }

    fn defend(&mut self, request: &MoveRequest) -> Action {
        self.pick(request)
    }
}

#[cfg(test)]
mod tests {
    use perdurak::{Game, GameConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn random_bots_finish_a_game() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig {
            num_seats: 3,
            ..GameConfig::default()
        };
        let mut game = Game::new(config, &mut rng).unwrap();
        let mut bots: Vec<RandomBot<StdRng>> = (0..3)
            .map(|seat| RandomBot::new(StdRng::seed_from_u64(seat)))
            .collect();
        while let Some(request) = game.request() {
            let action = bots[request.seat].decide(&request);
            game.apply(action).unwrap();
        }
        assert!(game.outcome().is_some());
    }
}
