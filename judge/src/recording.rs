use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Collects the requests of one game and writes them out as `game_NNNNNN.json`.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    /// `request` and `response` must already be serialized JSON.
    pub fn store_request(&mut self, player: &str, request: String, response: String) {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: String::from(request.trim_end()),
            response,
        });
    }

    // The request/response are already JSON strings, so they are spliced in
    // directly instead of being escaped by serde.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        write!(writer, "[")?;
        for (idx, req) in std::mem::take(&mut self.requests).into_iter().enumerate() {
            if idx > 0 {
                write!(writer, ",")?;
            }
            write!(
                writer,
                "\n  {{\n    \"player\": {},\n    \"request\": {},\n    \"response\": {}\n  }}",
                serde_json::to_string(&req.player)?,
                req.request,
                req.response
            )?;
        }
        writeln!(writer, "\n]")?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    player: String,
    request: String,
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_is_valid_json() {
        let directory = std::env::temp_dir().join(format!("perdurak_rec_{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let mut recorder = Recorder::new(directory.clone()).unwrap();
        recorder.store_request("a \"quoted\" nick", String::from("{\"type\":\"Bye\"}\n"), String::from("{}"));
        recorder.store_request("b", String::from("[1,2]"), String::from("null"));
        let path = recorder.write_game_recording().unwrap();
        assert!(path.ends_with("game_000001.json"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed[0]["player"], "a \"quoted\" nick");
        assert_eq!(parsed[0]["request"]["type"], "Bye");
        assert_eq!(parsed[1]["response"], serde_json::Value::Null);
        std::fs::remove_dir_all(&directory).unwrap();
    }
}
