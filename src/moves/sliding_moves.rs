//! Bishop, rook and queen ray walking.
//!
//! Each ray runs outward one square at a time, stops at the board edge,
//! includes an enemy-occupied square and stops there, and stops before a
//! square held by a piece of the mover's own color.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn bishop_targets(color: Color, from: Square, board: &Board, out: &mut Vec<Square>) {
    trace_rays(color, from, board, &BISHOP_DIRECTIONS, out);
}

#[inline]
pub fn rook_targets(color: Color, from: Square, board: &Board, out: &mut Vec<Square>) {
    trace_rays(color, from, board, &ROOK_DIRECTIONS, out);
}

#[inline]
pub fn queen_targets(color: Color, from: Square, board: &Board, out: &mut Vec<Square>) {
    trace_rays(color, from, board, &BISHOP_DIRECTIONS, out);
    trace_rays(color, from, board, &ROOK_DIRECTIONS, out);
}

fn trace_rays(
    color: Color,
    from: Square,
    board: &Board,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            match board.get(next) {
                None => out.push(next),
                Some(occupant) => {
                    if occupant.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}
