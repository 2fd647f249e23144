//! Board mutation for an accepted move.
//!
//! Handles plain relocation and capture, the indirect capture of en passant,
//! and the rook hop that accompanies castling. Legality is the caller's job.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::move_generation::special_moves::castling_rook_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    EnPassant,
    Castle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The mover as it stands on the destination square.
    pub moved: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

impl AppliedMove {
    /// Pawn moves and captures reset the fifty-move clock and repetition history.
    #[inline]
    pub fn is_irreversible(&self) -> bool {
        self.moved.kind == PieceKind::Pawn || self.captured.is_some()
    }
}

/// Move the piece on `from` to `to`. Returns `None` when `from` is empty or
/// either square is off the board.
pub fn apply_move(board: &mut Board, from: Square, to: Square) -> Option<AppliedMove> {
    if !board.is_inside(to) {
        return None;
    }
    let mut piece = board.remove(from)?;
    let mut captured = None;
    let mut kind = MoveKind::Normal;

    if piece.kind == PieceKind::Pawn && from.col != to.col && board.is_empty(to) {
        captured = board.remove(Square::new(from.row, to.col));
        kind = MoveKind::EnPassant;
    }

    if let Some((rook_from, rook_to)) = castling_rook_move(&piece, from, to) {
        if let Some(mut rook) = board.remove(rook_from) {
            rook.has_moved = true;
            board.place(rook, rook_to);
        }
        kind = MoveKind::Castle;
    }

    if let Some(target) = board.remove(to) {
        captured = Some(target);
    }

    piece.has_moved = true;
    board.place(piece, to);
    piece.position = to;

    Some(AppliedMove {
        moved: piece,
        from,
        to,
        captured,
        kind,
    })
}
