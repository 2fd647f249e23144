//! Opponent abstraction shared by the random mover, external UCI engines and
//! the background search worker.
//!
//! An engine receives a snapshot of the game and answers with at most one
//! move. It never mutates the authoritative state; the session applies the
//! answer through the normal move protocol.

use serde::Deserialize;

use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::MoveText;

pub const DEFAULT_MOVETIME_MS: u64 = 1000;
pub const DEFAULT_ELO: u32 = 1350;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GoParams {
    pub movetime_ms: u64,
    /// Requested playing strength for engines that can limit themselves.
    pub elo: Option<u32>,
    pub depth: Option<u8>,
}

impl Default for GoParams {
    fn default() -> Self {
        Self {
            movetime_ms: DEFAULT_MOVETIME_MS,
            elo: Some(DEFAULT_ELO),
            depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` when the side to move has nothing to play.
    pub best_move: Option<MoveText>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError>;
}
