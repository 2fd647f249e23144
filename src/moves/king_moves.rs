//! Single-step king targets. Castling is added by the special-move layer.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn king_targets(color: Color, from: Square, board: &Board, out: &mut Vec<Square>) {
    for (d_row, d_col) in KING_OFFSETS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        if board.get(to).map_or(true, |occupant| occupant.color != color) {
            out.push(to);
        }
    }
}
