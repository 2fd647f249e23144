//! Uniform random mover.
//!
//! Used for diagnostics, integration tests and as the weakest opponent.

use rand::prelude::IndexedRandom;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::move_generation::special_moves::is_promotion_move;
use crate::utils::long_algebraic::MoveText;

#[derive(Debug, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random Mover"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError> {
        let legal_moves = game_state.all_legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        let mut rng = rand::rng();
        let Some(picked) = legal_moves.as_slice().choose(&mut rng) else {
            return Ok(out);
        };

        let promotion = game_state
            .board()
            .get(picked.from)
            .filter(|piece| is_promotion_move(piece, picked.to))
            .map(|_| PieceKind::Queen);

        debug!(from = ?picked.from, to = ?picked.to, "random move picked");
        out.best_move = Some(MoveText {
            from: picked.from,
            to: picked.to,
            promotion,
        });
        Ok(out)
    }
}
