use std::io::{BufRead, BufReader, Write};
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use perdurak::{Action, Card, GameOutcome, MoveRequest, Okay, Request};
use perdurak_bot_utils::{Bot, RandomBot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::human::HumanPlayer;
use crate::recording::Recorder;
use crate::{Builtin, PlayerConfig};

/// A bot running in its own process, talking JSON lines over stdin/stdout.
pub struct ProcessPlayer {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

enum Backend {
    Process(ProcessPlayer),
    InProcess(Box<dyn Bot>),
}

/// Makes the decisions for one seat.
pub struct Player {
    pub name: String,
    backend: Backend,
}

impl ProcessPlayer {
    pub fn spawn(cmd: &[String]) -> anyhow::Result<Self> {
        let Some((executable_path, args)) = cmd.split_first() else {
            anyhow::bail!("Empty command line for a bot");
        };
        let child_proc = Command::new(executable_path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = child_proc
            .stdin
            .ok_or_else(|| anyhow::anyhow!("Could not access stdin of {}", executable_path))?;
        let stdout = child_proc
            .stdout
            .ok_or_else(|| anyhow::anyhow!("Could not access stdout of {}", executable_path))?;
        Ok(Self {
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        name: &str,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        self.stdout.read_line(&mut self.buf)?;
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(name, req_json, String::from(serialized_response));
        }
        Ok(response)
    }
}

impl Player {
    pub fn process(name: &str, cmd: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            name: String::from(name),
            backend: Backend::Process(ProcessPlayer::spawn(cmd)?),
        })
    }

    pub fn in_process(name: &str, bot: Box<dyn Bot>) -> Self {
        Self {
            name: String::from(name),
            backend: Backend::InProcess(bot),
        }
    }

    pub fn from_config(config: &PlayerConfig, rng: &mut StdRng) -> anyhow::Result<Self> {
        config.check()?;
        match config.builtin {
            Some(Builtin::Random) => {
                let bot = RandomBot::new(StdRng::seed_from_u64(rng.gen()));
                Ok(Self::in_process(&config.nick, Box::new(bot)))
            }
            Some(Builtin::Human) => Ok(Self::in_process(
                &config.nick,
                Box::new(HumanPlayer::new(std::io::stdin().lock(), std::io::stdout())),
            )),
            None => Self::process(&config.nick, &config.cmd),
        }
    }

    pub fn new_game(
        &mut self,
        recorder: &mut Option<Recorder>,
        seat: usize,
        num_seats: usize,
        trump: Card,
    ) -> anyhow::Result<()> {
        match &mut self.backend {
            Backend::Process(proc) => {
                let req = Request::NewGame {
                    seat,
                    num_seats,
                    trump,
                };
                let _: Okay = proc.perform_request(&self.name, recorder, &req)?;
            }
            Backend::InProcess(bot) => bot.new_game(seat, num_seats, trump),
        }
        Ok(())
    }

    pub fn decide(
        &mut self,
        recorder: &mut Option<Recorder>,
        request: &MoveRequest,
    ) -> anyhow::Result<Action> {
        match &mut self.backend {
            Backend::Process(proc) => {
                let req = Request::Decide(request.clone());
                proc.perform_request(&self.name, recorder, &req)
            }
            Backend::InProcess(bot) => {
                let action = bot.decide(request);
                if let Some(recorder) = recorder {
                    recorder.store_request(
                        &self.name,
                        serde_json::to_string(&Request::Decide(request.clone()))?,
                        serde_json::to_string(&action)?,
                    );
                }
                Ok(action)
            }
        }
    }

    pub fn game_over(
        &mut self,
        recorder: &mut Option<Recorder>,
        outcome: &GameOutcome,
    ) -> anyhow::Result<()> {
        match &mut self.backend {
            Backend::Process(proc) => {
                let req = Request::GameOver {
                    outcome: outcome.clone(),
                };
                let _: Okay = proc.perform_request(&self.name, recorder, &req)?;
            }
            Backend::InProcess(bot) => bot.game_over(outcome),
        }
        Ok(())
    }

    /// Tells a bot process to shut down.
    pub fn bye(&mut self) -> anyhow::Result<()> {
        if let Backend::Process(proc) = &mut self.backend {
            let req_json = serde_json::to_string(&Request::Bye)?;
            writeln!(proc.stdin, "{}", req_json)?;
            proc.stdin.flush()?;
        }
        Ok(())
    }
}
