use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use perdurak::GameConfig;
use serde::{Deserialize, Serialize};

/// Settings for running games, on top of the rules in [`GameConfig`].
#[derive(Clone, Debug)]
pub struct Config {
    pub game: GameConfig,
    /// How many illegal moves a player may make in one game before forfeiting it.
    pub max_illegal_moves: usize,
}

/// Players that run inside the judge process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Builtin {
    Random,
    /// Asks on the terminal.
    Human,
}

/// A player config JSON file.
///
/// ```json
/// { "nick": "random", "cmd": ["target/release/random_bot", "--seed", "3"] }
/// { "nick": "me", "builtin": "human" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// The executable and its arguments, for a bot running as its own process.
    #[serde(default)]
    pub cmd: Vec<String>,
    #[serde(default)]
    pub builtin: Option<Builtin>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: PlayerConfig = serde_json::from_reader(reader)?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        match (self.cmd.is_empty(), self.builtin) {
            (true, None) => anyhow::bail!("Player '{}' needs either 'cmd' or 'builtin'", self.nick),
            (false, Some(_)) => {
                anyhow::bail!("Player '{}' can't have both 'cmd' and 'builtin'", self.nick)
            }
            _ => Ok(()),
        }
    }
}

/// Reads a [`GameConfig`] from a JSON file.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_player_configs() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{"nick": "bot", "cmd": ["./random_bot", "--seed", "1"]}"#)
                .unwrap();
        assert!(config.check().is_ok());
        assert_eq!(config.cmd.len(), 3);

        let config: PlayerConfig =
            serde_json::from_str(r#"{"nick": "me", "builtin": "human"}"#).unwrap();
        assert_eq!(config.builtin, Some(Builtin::Human));
        assert!(config.check().is_ok());

        let config: PlayerConfig = serde_json::from_str(r#"{"nick": "nobody"}"#).unwrap();
        assert!(config.check().is_err());
    }
}
