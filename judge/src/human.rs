use std::io::{BufRead, Write};

use perdurak::{visualize_table, Action, Card, GameOutcome, MoveRequest};
use perdurak_bot_utils::Bot;

/// Plays a seat by asking on a terminal.
///
/// Attackers type a hand position, or `d` to stop. Defenders type
/// `<hand position> <table position>` to cover, `s <hand position>` to switch,
/// or `t` to take the table.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
    seat: usize,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            seat: 0,
        }
    }

    fn show(&mut self, request: &MoveRequest) -> std::io::Result<()> {
        writeln!(
            self.output,
            "\nSeat {} | trump {} | deck {} | hands {:?}",
            request.seat, request.trump, request.deck_remaining, request.hand_sizes
        )?;
        if request.table.is_empty() {
            writeln!(self.output, "(empty table)")?;
        } else {
            write!(self.output, "{}", visualize_table(&request.table))?;
        }
        let hand: Vec<String> = request
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| format!("[{}] {}", idx, card))
            .collect();
        writeln!(self.output, "Hand: {}", hand.join("  "))
    }

    /// Returns `None` on EOF.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        write!(self.output, "{}> ", prompt).ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
        }
    }

    fn prompt(
        &mut self,
        request: &MoveRequest,
        prompt: &str,
        parse: fn(&MoveRequest, &str) -> Option<Action>,
    ) -> Action {
        if self.show(request).is_err() {
            return Action::Decline;
        }
        let legal = request.legal_actions();
        loop {
            let Some(line) = self.read_line(prompt) else {
                return fallback(&legal);
            };
            match parse(request, &line) {
                Some(action) if legal.contains(&action) => return action,
                _ => {
                    let _ = writeln!(self.output, "Not a legal move: '{}'", line);
                }
            }
        }
    }
}

fn parse_attack(request: &MoveRequest, line: &str) -> Option<Action> {
    if line == "d" {
        return Some(Action::Decline);
    }
    request.attack(line.parse().ok()?)
}

fn parse_defense(request: &MoveRequest, line: &str) -> Option<Action> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["t"] => Some(Action::Decline),
        ["s", hand_idx] => request.switch(hand_idx.parse().ok()?),
        [hand_idx, target] => request.defend(hand_idx.parse().ok()?, target.parse().ok()?),
        _ => None,
    }
}

// Without input, play the first legal action so the game can go on.
fn fallback(legal: &[Action]) -> Action {
    if legal.contains(&Action::Decline) {
        Action::Decline
    } else {
        legal.first().copied().unwrap_or(Action::Decline)
    }
}

impl<R: BufRead, W: Write> Bot for HumanPlayer<R, W> {
    fn new_game(&mut self, seat: usize, num_seats: usize, trump: Card) {
        self.seat = seat;
        let _ = writeln!(
            self.output,
            "New game: you are seat {} of {}, trump card is {}",
            seat, num_seats, trump
        );
    }

    fn attack(&mut self, request: &MoveRequest) -> Action {
        let prompt = if request.can_decline {
            "attack (position, or d to stop)"
        } else {
            "attack (position)"
        };
        self.prompt(request, prompt, parse_attack)
    }

    fn defend(&mut self, request: &MoveRequest) -> Action {
        self.prompt(
            request,
            "defend (position target, s position to switch, t to take)",
            parse_defense,
        )
    }

    fn game_over(&mut self, outcome: &GameOutcome) {
        let message = match outcome.durak {
            Some(durak) if durak == self.seat => String::from("You are the durak."),
            Some(durak) => format!("Seat {} is the durak.", durak),
            None => String::from("Draw, nobody is the durak."),
        };
        let _ = writeln!(self.output, "Game over. {}", message);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use perdurak::{Game, GameConfig, NoShuffle};

    use super::*;

    fn first_request() -> MoveRequest {
        // Unshuffled: seat 0 holds 9♠ to A♠ and opens, the trump is 6♥
        let game = Game::new(GameConfig::default(), &mut NoShuffle).unwrap();
        game.request().unwrap()
    }

    #[test]
    fn reprompts_until_legal() {
        let request = first_request();
        let input = Cursor::new("d\n99\n0\n");
        let mut output = Vec::new();
        let action = HumanPlayer::new(input, &mut output).decide(&request);
        assert_eq!(action, request.attack(0).unwrap());
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Not a legal move").count(), 2);
    }

    #[test]
    fn eof_falls_back_to_a_legal_action() {
        let request = first_request();
        let mut output = Vec::new();
        let action = HumanPlayer::new(Cursor::new(""), &mut output).decide(&request);
        assert!(request.legal_actions().contains(&action));
    }

    #[test]
    fn parses_defense_commands() {
        let request = first_request();
        assert_eq!(parse_defense(&request, "t"), Some(Action::Decline));
        assert_eq!(parse_defense(&request, "s 1"), request.switch(1));
        assert_eq!(parse_defense(&request, "2 0"), request.defend(2, 0));
        assert_eq!(parse_defense(&request, "x"), None);
    }
}
