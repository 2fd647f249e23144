//! Client side of the UCI protocol for an external, strength-limited engine.
//!
//! The engine process is driven line by line: `uci`/`uciok` handshake, the
//! `UCI_LimitStrength` and `UCI_Elo` options, `isready`/`readyok`, then one
//! `position fen` + `go movetime` exchange per move. Only `bestmove` and
//! `info` replies are interpreted.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, info, trace, warn};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::parse_long_algebraic;

/// `bestmove` payloads that mean "no move".
const NULL_MOVES: [&str; 2] = ["(none)", "0000"];

pub struct UciEngine<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    child: Option<Child>,
    name: String,
    initialized: bool,
    configured_elo: Option<u32>,
}

impl UciEngine<BufReader<ChildStdout>, ChildStdin> {
    /// Launch the engine binary at `path` with piped stdio.
    pub fn spawn(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(EngineError::Disconnected)?;
        let stdout = child.stdout.take().ok_or(EngineError::Disconnected)?;
        info!(path = %path.display(), pid = child.id(), "engine process started");

        let mut engine = Self::from_streams(BufReader::new(stdout), stdin);
        engine.child = Some(child);
        Ok(engine)
    }
}

impl<R: BufRead, W: Write> UciEngine<R, W> {
    pub fn from_streams(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            child: None,
            name: String::from("UCI engine"),
            initialized: false,
            configured_elo: None,
        }
    }

    fn send(&mut self, command: &str) -> Result<(), EngineError> {
        trace!(command, "engine <");
        writeln!(self.writer, "{command}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(EngineError::Disconnected);
        }
        let line = line.trim().to_owned();
        trace!(line = %line, "engine >");
        Ok(line)
    }

    /// Discard output until a line equal to `token` arrives.
    fn wait_for(&mut self, token: &str) -> Result<(), EngineError> {
        loop {
            let line = self.read_line()?;
            if line == token {
                return Ok(());
            }
            if let Some(name) = line.strip_prefix("id name ") {
                self.name = name.to_owned();
            }
        }
    }

    fn ensure_ready(&mut self, elo: Option<u32>) -> Result<(), EngineError> {
        if !self.initialized {
            self.send("uci")?;
            self.wait_for("uciok")?;
            self.initialized = true;
            debug!(name = %self.name, "engine handshake complete");
        }

        if elo != self.configured_elo {
            match elo {
                Some(elo) => {
                    self.send("setoption name UCI_LimitStrength value true")?;
                    self.send(&format!("setoption name UCI_Elo value {elo}"))?;
                }
                None => self.send("setoption name UCI_LimitStrength value false")?,
            }
            self.configured_elo = elo;
        }

        self.send("isready")?;
        self.wait_for("readyok")
    }
}

impl<R, W> Engine for UciEngine<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        let elo = self.configured_elo;
        self.ensure_ready(elo)?;
        self.send("ucinewgame")
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError> {
        self.ensure_ready(params.elo)?;
        self.send(&format!("position fen {}", game_state.position_string()))?;
        match params.depth {
            Some(depth) => self.send(&format!(
                "go movetime {} depth {depth}",
                params.movetime_ms
            ))?,
            None => self.send(&format!("go movetime {}", params.movetime_ms))?,
        }

        let mut out = EngineOutput::default();
        loop {
            let line = self.read_line()?;
            if line.starts_with("info") {
                out.info_lines.push(line);
                continue;
            }
            let Some(rest) = line.strip_prefix("bestmove") else {
                continue;
            };

            let token = rest
                .split_whitespace()
                .next()
                .ok_or_else(|| EngineError::Protocol(line.clone()))?;
            if NULL_MOVES.contains(&token) {
                debug!("engine reports no legal move");
                return Ok(out);
            }

            let mv = parse_long_algebraic(token)?;
            debug!(best = token, "engine answered");
            out.best_move = Some(mv);
            return Ok(out);
        }
    }
}

impl<R: BufRead, W: Write> Drop for UciEngine<R, W> {
    fn drop(&mut self) {
        let _ = writeln!(self.writer, "quit");
        let _ = self.writer.flush();
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                trace!(%err, "engine already exited");
            }
            if let Err(err) = child.wait() {
                warn!(%err, "failed to reap engine process");
            }
        }
    }
}
