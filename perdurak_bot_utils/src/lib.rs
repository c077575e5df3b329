mod random;
pub use random::*;

use perdurak::{Action, Card, GameOutcome, MoveRequest, Okay, Phase, Request};

/// A trait to simplify writing bots.
///
/// Every request carries the legal options as positions into the bot's hand,
/// see [`MoveRequest`].
pub trait Bot {
    fn new_game(&mut self, seat: usize, num_seats: usize, trump: Card);
    /// Called while attacking or piling on.
    fn attack(&mut self, request: &MoveRequest) -> Action;
    /// Called when the bot has to cover, switch, or take the table.
    fn defend(&mut self, request: &MoveRequest) -> Action;
    fn game_over(&mut self, _outcome: &GameOutcome) {}

    fn decide(&mut self, request: &MoveRequest) -> Action {
        match request.phase {
            Phase::Defending { .. } => self.defend(request),
            _ => self.attack(request),
        }
    }

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame {
                    seat,
                    num_seats,
                    trump,
                } => {
                    self.new_game(seat, num_seats, trump);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::Decide(request) => {
                    serde_json::to_writer(&mut stdout, &self.decide(&request))?
                }
                Request::GameOver { outcome } => {
                    self.game_over(&outcome);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
