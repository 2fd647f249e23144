//! The authoritative game: board, turn, selection protocol and end detection.
//!
//! `GameState` is the single entry point for user interfaces, opponents and
//! the network relay. Every public mutation is a complete, synchronous
//! transition; rule violations are not errors, they simply leave the board
//! unchanged.

use std::fmt;

use tracing::{debug, info, trace};

use crate::errors::FenError;
use crate::game_state::board::{Board, BoardFingerprint};
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::*;
use crate::move_generation::game_termination::evaluate_outcome;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, legal_targets, LegalMove};
use crate::move_generation::special_moves::is_promotion_move;
use crate::utils::fen_generator::generate_position_string;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_board;

/// What a single `activate` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Nothing changed: empty or enemy square, off-board, pending promotion, or game over.
    Ignored,
    /// A piece of the side to move is now selected.
    Selected,
    /// A selection was dropped because the square was not a legal target.
    SelectionCleared,
    /// A move was applied and the turn passed (or the game ended).
    Moved,
    /// A move was applied and now waits for `resolve_promotion`.
    PromotionPending,
}

impl Activation {
    #[inline]
    pub fn board_changed(self) -> bool {
        matches!(self, Activation::Moved | Activation::PromotionPending)
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_turn: Color,
    selected: Option<Square>,
    legal_targets: Vec<Square>,
    last_move: Option<MoveRecord>,
    pending_promotion: Option<PendingPromotion>,
    halfmove_clock: u32,
    position_history: Vec<BoardFingerprint>,
    outcome: Option<GameOutcome>,
    config: RulesConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self::from_position(Board::standard(), Color::White, None, 0, config)
    }

    /// Start from an arbitrary position. Terminal conditions are evaluated
    /// immediately, so a mated or drawn setup is already over.
    pub fn from_position(
        board: Board,
        current_turn: Color,
        last_move: Option<MoveRecord>,
        halfmove_clock: u32,
        config: RulesConfig,
    ) -> Self {
        let mut game = Self {
            position_history: vec![board.fingerprint()],
            board,
            current_turn,
            selected: None,
            legal_targets: Vec::new(),
            last_move,
            pending_promotion: None,
            halfmove_clock,
            outcome: None,
            config,
        };
        game.outcome = game.evaluate();
        game
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen, RulesConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: RulesConfig) -> Result<Self, FenError> {
        parse_fen(fen, config)
    }

    /// Select a piece, move the selected piece, or drop the selection.
    pub fn activate(&mut self, square: Square) -> Activation {
        if self.outcome.is_some() {
            trace!(?square, "activation ignored: game over");
            return Activation::Ignored;
        }
        if self.pending_promotion.is_some() {
            debug!(?square, "activation ignored: promotion pending");
            return Activation::Ignored;
        }
        if !self.board.is_inside(square) {
            debug!(?square, "activation ignored: off the board");
            return Activation::Ignored;
        }

        match self.selected {
            None => self.try_select(square),
            Some(from) => {
                let is_target = self.legal_targets.contains(&square);
                self.clear_selection();
                if is_target {
                    self.commit_move(from, square)
                } else {
                    trace!(?from, ?square, "selection cleared");
                    Activation::SelectionCleared
                }
            }
        }
    }

    /// Replace the promoting pawn and finish the turn. Pawn and king choices
    /// become queens. Returns false when no promotion is pending.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        let Some(pending) = self.pending_promotion.take() else {
            return false;
        };

        let choice = kind.promotion_choice();
        let mut promoted = Piece::new(pending.color, choice);
        promoted.has_moved = true;
        self.board.place(promoted, pending.square);

        // The pawn move already reset the history; restate it with the new piece.
        self.position_history.clear();
        self.position_history.push(self.board.fingerprint());

        debug!(color = ?pending.color, square = ?pending.square, ?choice, "promotion resolved");
        self.finish_turn();
        true
    }

    /// Run the select-then-move sequence for a move arriving as a pair of
    /// squares, dropping any stale selection first.
    pub fn play_move(&mut self, from: Square, to: Square) -> Activation {
        self.clear_selection();
        match self.activate(from) {
            Activation::Selected => {}
            other => return other,
        }
        match self.activate(to) {
            Activation::SelectionCleared => Activation::Ignored,
            other => other,
        }
    }

    /// Apply a move tuple from a remote peer or opponent, resolving any
    /// promotion with `promotion` (queen when absent).
    pub fn apply_remote(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> Activation {
        match self.play_move(from, to) {
            Activation::PromotionPending => {
                self.resolve_promotion(promotion.unwrap_or(PieceKind::Queen));
                Activation::Moved
            }
            other => other,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.legal_targets.clear();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    #[inline]
    pub fn selected_square(&self) -> Option<Square> {
        self.selected
    }

    /// Targets of the current selection; empty when nothing is selected.
    #[inline]
    pub fn legal_targets(&self) -> &[Square] {
        &self.legal_targets
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn position_history(&self) -> &[BoardFingerprint] {
        &self.position_history
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    /// Every legal (from, to) pair for the side to move.
    pub fn all_legal_moves(&self) -> Vec<LegalMove> {
        all_legal_moves(&self.board, self.current_turn, self.last_move.as_ref())
    }

    /// Position string for an external search engine.
    #[inline]
    pub fn position_string(&self) -> String {
        generate_position_string(&self.board, self.current_turn)
    }

    fn try_select(&mut self, square: Square) -> Activation {
        let Some(piece) = self.board.get(square) else {
            return Activation::Ignored;
        };
        if piece.color != self.current_turn {
            return Activation::Ignored;
        }

        self.selected = Some(square);
        self.legal_targets = legal_targets(&self.board, square, self.last_move.as_ref());
        debug!(?square, kind = ?piece.kind, targets = self.legal_targets.len(), "piece selected");
        Activation::Selected
    }

    fn commit_move(&mut self, from: Square, to: Square) -> Activation {
        let Some(applied) = apply_move(&mut self.board, from, to) else {
            return Activation::Ignored;
        };
        debug!(
            ?from,
            ?to,
            kind = ?applied.moved.kind,
            special = ?applied.kind,
            captured = ?applied.captured.map(|p| p.kind),
            "move applied"
        );

        self.last_move = Some(MoveRecord {
            piece: applied.moved,
            from,
            to,
        });
        self.record_position(applied.is_irreversible());

        if is_promotion_move(&applied.moved, to) {
            self.pending_promotion = Some(PendingPromotion {
                color: applied.moved.color,
                square: to,
            });
            debug!(square = ?to, "awaiting promotion choice");
            return Activation::PromotionPending;
        }

        self.finish_turn();
        Activation::Moved
    }

    fn record_position(&mut self, irreversible: bool) {
        let fingerprint = self.board.fingerprint();
        if irreversible {
            self.halfmove_clock = 0;
            self.position_history.clear();
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        self.position_history.push(fingerprint);

        let cap = self.config.position_history_cap.max(1);
        if self.position_history.len() > cap {
            let excess = self.position_history.len() - cap;
            self.position_history.drain(..excess);
        }
    }

    fn finish_turn(&mut self) {
        self.current_turn = self.current_turn.opposite();
        self.outcome = self.evaluate();
        if let Some(outcome) = self.outcome {
            info!(reason = ?outcome.reason, winner = ?outcome.winner, "game over");
        }
    }

    fn evaluate(&self) -> Option<GameOutcome> {
        evaluate_outcome(
            &self.board,
            self.current_turn,
            self.last_move.as_ref(),
            self.halfmove_clock,
            &self.position_history,
            &self.config,
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_board(&self.board))?;
        write!(f, "{:?} to move", self.current_turn)
    }
}
