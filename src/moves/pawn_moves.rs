//! Pawn pushes and diagonal captures. En passant is derived from move history
//! by the special-move layer, not here.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

pub fn pawn_targets(color: Color, from: Square, board: &Board, out: &mut Vec<Square>) {
    let dir = color.forward_direction();

    if let Some(one_step) = from.offset(dir, 0) {
        if board.is_empty(one_step) {
            out.push(one_step);

            if from.row == color.pawn_start_row() {
                if let Some(two_step) = from.offset(2 * dir, 0) {
                    if board.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for to in pawn_capture_squares(color, from) {
        if board.get(to).is_some_and(|occupant| occupant.color != color) {
            out.push(to);
        }
    }
}

/// The forward diagonals a pawn of `color` on `from` strikes, occupied or not.
pub fn pawn_capture_squares(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let dir = color.forward_direction();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |d_col| from.offset(dir, d_col))
}
