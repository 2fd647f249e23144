//! Game modes layered over one `GameState`.
//!
//! A session decides whose input is accepted and drives any non-local side.
//! Interfaces call [`ChessSession::handle_square`] for clicks or typed squares
//! and [`ChessSession::update`] once per frame.

use tracing::{debug, warn};

use crate::engines::background_search::BackgroundSearch;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::{Activation, GameState};

pub trait ChessSession {
    fn game(&self) -> &GameState;

    /// The side this interface plays, or `None` when it plays both.
    fn local_color(&self) -> Option<Color>;

    fn handle_square(&mut self, square: Square) -> Activation;

    fn resolve_promotion(&mut self, kind: PieceKind) -> bool;

    /// Advance non-local work such as opponent searches or network traffic.
    fn update(&mut self) {}

    /// True when the non-local side can no longer produce moves.
    fn is_stalled(&self) -> bool {
        false
    }

    /// True when input from this interface would be accepted right now.
    fn is_local_turn(&self) -> bool {
        let game = self.game();
        !game.is_game_over()
            && self
                .local_color()
                .map_or(true, |color| color == game.current_turn())
    }
}

/// Both sides play from the same interface.
#[derive(Debug, Clone, Default)]
pub struct LocalSession {
    game: GameState,
}

impl LocalSession {
    pub fn new(game: GameState) -> Self {
        Self { game }
    }
}

impl ChessSession for LocalSession {
    fn game(&self) -> &GameState {
        &self.game
    }

    fn local_color(&self) -> Option<Color> {
        None
    }

    fn handle_square(&mut self, square: Square) -> Activation {
        self.game.activate(square)
    }

    fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        self.game.resolve_promotion(kind)
    }
}

/// A human against an engine searching on a worker thread.
pub struct AiSession {
    game: GameState,
    human_color: Color,
    search: BackgroundSearch,
    opponent_failed: bool,
}

impl AiSession {
    pub fn new(game: GameState, human_color: Color, engine: Box<dyn Engine>, params: GoParams) -> Self {
        Self {
            game,
            human_color,
            search: BackgroundSearch::new(engine, params),
            opponent_failed: false,
        }
    }

    #[inline]
    pub fn ai_color(&self) -> Color {
        self.human_color.opposite()
    }

    #[inline]
    pub fn is_thinking(&self) -> bool {
        self.search.is_searching()
    }

    /// Block until the opponent has replied, for front ends without a frame loop.
    pub fn wait_for_opponent(&mut self) {
        if !self.needs_ai_move() {
            return;
        }
        if !self.search.is_searching() && !self.search.start(&self.game) {
            self.opponent_failed = true;
            return;
        }
        let result = self.search.wait();
        self.apply_search_result(result);
    }

    fn needs_ai_move(&self) -> bool {
        !self.opponent_failed
            && !self.game.is_game_over()
            && self.game.pending_promotion().is_none()
            && self.game.current_turn() == self.ai_color()
    }

    fn apply_search_result(&mut self, result: Result<EngineOutput, EngineError>) {
        let output = match result {
            Ok(output) => output,
            Err(err) => {
                warn!(%err, "opponent search failed");
                self.opponent_failed = true;
                return;
            }
        };
        let Some(mv) = output.best_move else {
            debug!("opponent has no move");
            self.opponent_failed = true;
            return;
        };

        let activation = self.game.apply_remote(mv.from, mv.to, mv.promotion);
        if !activation.board_changed() {
            warn!(from = ?mv.from, to = ?mv.to, ?activation, "opponent move rejected");
            self.opponent_failed = true;
        }
    }
}

impl ChessSession for AiSession {
    fn game(&self) -> &GameState {
        &self.game
    }

    fn local_color(&self) -> Option<Color> {
        Some(self.human_color)
    }

    fn handle_square(&mut self, square: Square) -> Activation {
        if !self.is_local_turn() {
            return Activation::Ignored;
        }
        self.game.activate(square)
    }

    fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        if self.game.current_turn() != self.human_color {
            return false;
        }
        self.game.resolve_promotion(kind)
    }

    fn is_stalled(&self) -> bool {
        self.opponent_failed
    }

    fn update(&mut self) {
        if !self.needs_ai_move() {
            return;
        }
        if !self.search.is_searching() {
            self.opponent_failed = !self.search.start(&self.game);
            return;
        }
        if let Some(result) = self.search.try_take() {
            self.apply_search_result(result);
        }
    }
}
