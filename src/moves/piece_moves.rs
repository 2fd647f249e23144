//! Pseudo-legal target generation, dispatched on piece kind.
//!
//! Results ignore whether the mover's own king ends up attacked; the
//! legality filter in `move_generation` handles that.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::pawn_targets;
use crate::moves::sliding_moves::{bishop_targets, queen_targets, rook_targets};

pub fn pseudo_legal_targets(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    push_pseudo_legal_targets(piece, board, &mut out);
    out
}

pub fn push_pseudo_legal_targets(piece: &Piece, board: &Board, out: &mut Vec<Square>) {
    let (color, from) = (piece.color, piece.position);
    match piece.kind {
        PieceKind::Pawn => pawn_targets(color, from, board, out),
        PieceKind::Knight => knight_targets(color, from, board, out),
        PieceKind::Bishop => bishop_targets(color, from, board, out),
        PieceKind::Rook => rook_targets(color, from, board, out),
        PieceKind::Queen => queen_targets(color, from, board, out),
        PieceKind::King => king_targets(color, from, board, out),
    }
}
