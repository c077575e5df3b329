use perdurak::{visualize_snapshot, Game, GameOutcome, InvalidMove, TurnOutcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace, warn};

use crate::player::Player;
use crate::recording::Recorder;
use crate::Config;

/// Player indices refer to the `players` slice given to [`play_game()`],
/// not to seats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Finished {
        finish_order: Vec<usize>,
        durak: Option<usize>,
    },
    IllegalMoveByPlayer {
        player_idx: usize,
        err: InvalidMove,
    },
}

/// Plays one game with one seat per player, in a random seating order.
///
/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    config: &Config,
    rng: &mut StdRng,
    players: &mut [Player],
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    if players.len() != config.game.num_seats {
        anyhow::bail!(
            "{} players for a game with {} seats",
            players.len(),
            config.game.num_seats
        );
    }
    // seat_to_player[seat] is the index into players
    let mut seat_to_player: Vec<usize> = (0..players.len()).collect();
    seat_to_player.shuffle(rng);

    let mut game = Game::new(config.game.clone(), rng)?;
    let trump = game.state().deck.trump();
    for (seat, &player_idx) in seat_to_player.iter().enumerate() {
        players[player_idx].new_game(recorder, seat, players.len(), trump)?;
    }

    let mut illegal_moves = vec![0; players.len()];
    while let Some(request) = game.request() {
        let seat = request.seat;
        let player = &mut players[seat_to_player[seat]];
        let action = player.decide(recorder, &request)?;
        match game.apply(action) {
            Ok(TurnOutcome::Continue) => {}
            Ok(TurnOutcome::RoundEnded(summary)) => {
                debug!(
                    round = summary.round,
                    attacker = summary.attacker,
                    defender = summary.defender,
                    defended = summary.defended,
                    switched = summary.switched,
                    cards_taken = summary.cards_taken,
                    "Round ended"
                );
                trace!("\n{}", visualize_snapshot(&game.snapshot()));
            }
            Ok(TurnOutcome::GameOver(_)) => {}
            Err(err) => {
                illegal_moves[seat] += 1;
                warn!(player = %player.name, seat, ?action, %err, "Illegal move");
                if illegal_moves[seat] > config.max_illegal_moves {
                    if let Some(recorder) = recorder {
                        recorder.write_game_recording()?;
                    }
                    return Ok(GameResult::IllegalMoveByPlayer {
                        player_idx: seat_to_player[seat],
                        err,
                    });
                }
            }
        }
    }

    let outcome = match game.outcome() {
        Some(outcome) => outcome.clone(),
        None => anyhow::bail!("Game stopped without an outcome"),
    };
    for (seat, &player_idx) in seat_to_player.iter().enumerate() {
        // Each player sees the outcome in seat numbers, like the rest of the game
        players[player_idx].game_over(recorder, &outcome)?;
        trace!(seat, player = %players[player_idx].name, "Informed about game end");
    }
    if let Some(recorder) = recorder {
        recorder.write_game_recording()?;
    }

    Ok(to_player_result(&outcome, &seat_to_player))
}

fn to_player_result(outcome: &GameOutcome, seat_to_player: &[usize]) -> GameResult {
    GameResult::Finished {
        finish_order: outcome
            .finish_order
            .iter()
            .map(|&seat| seat_to_player[seat])
            .collect(),
        durak: outcome.durak.map(|seat| seat_to_player[seat]),
    }
}
