//! Canonical chess-rule constants and the tunable rule configuration.

use serde::Deserialize;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const BOARD_SIZE: i8 = 8;

/// Fifty full moves, counted in half-moves.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;
pub const REPETITION_THRESHOLD: usize = 3;
pub const POSITION_HISTORY_CAP: usize = 200;

pub const KING_START_COL: i8 = 4;
pub const KINGSIDE_ROOK_COL: i8 = 7;
pub const QUEENSIDE_ROOK_COL: i8 = 0;

/// Rule knobs applied by `GameState`. The defaults are the standard engine rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Most recent fingerprints kept for repetition detection.
    pub position_history_cap: usize,
    pub fifty_move_halfmoves: u32,
    pub repetition_threshold: usize,
    /// When false, pawns are ignored by the insufficient-material check.
    pub pawns_count_as_material: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            position_history_cap: POSITION_HISTORY_CAP,
            fifty_move_halfmoves: FIFTY_MOVE_HALFMOVES,
            repetition_threshold: REPETITION_THRESHOLD,
            pawns_count_as_material: false,
        }
    }
}
