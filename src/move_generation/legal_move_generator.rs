//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, filters self-check
//! outcomes, and adds castling and en-passant targets. Both the interactive
//! state machine and the opponents go through these entry points so that
//! every consumer sees the same set of legal moves.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, MoveRecord, PieceKind, Square};
use crate::move_generation::legal_move_checks::filter_legal_targets;
use crate::move_generation::special_moves::{castling_targets, en_passant_target};
use crate::moves::piece_moves::pseudo_legal_targets;

/// A legal (from, to) pair. Promotions are chosen separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
}

/// Every square the piece on `from` may legally move to. Empty when the square
/// is empty or off the board.
pub fn legal_targets(board: &Board, from: Square, last_move: Option<&MoveRecord>) -> Vec<Square> {
    let Some(piece) = board.get(from).copied() else {
        return Vec::new();
    };

    let mut targets = filter_legal_targets(board, &piece, pseudo_legal_targets(&piece, board));

    match piece.kind {
        PieceKind::King => targets.extend(castling_targets(board, &piece)),
        PieceKind::Pawn => targets.extend(en_passant_target(board, &piece, last_move)),
        _ => {}
    }

    targets
}

/// Short-circuits on the first legal move found for `color`.
pub fn has_any_legal_move(board: &Board, color: Color, last_move: Option<&MoveRecord>) -> bool {
    board
        .pieces_of(color)
        .any(|piece| !legal_targets(board, piece.position, last_move).is_empty())
}

pub fn all_legal_moves(board: &Board, color: Color, last_move: Option<&MoveRecord>) -> Vec<LegalMove> {
    let mut out = Vec::with_capacity(64);
    for piece in board.pieces_of(color) {
        let from = piece.position;
        out.extend(
            legal_targets(board, from, last_move)
                .into_iter()
                .map(|to| LegalMove { from, to }),
        );
    }
    out
}
