//! Conversions between board squares and coordinates such as `e4`.
//!
//! Files `a`..`h` map to columns 0..7 and ranks `8`..`1` map to rows 0..7,
//! so white's back rank (row 7) is rank 1.

use crate::errors::NotationError;
use crate::game_state::chess_types::Square;

/// Convert a coordinate (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, NotationError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }

    let col = (file - b'a') as i8;
    let row = (b'8' - rank) as i8;
    Ok(Square::new(row, col))
}

/// Convert a square to its coordinate (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, NotationError> {
    if !square.is_on_board() {
        return Err(NotationError::OutOfBounds {
            row: square.row,
            col: square.col,
        });
    }

    let file_char = char::from(b'a' + square.col as u8);
    let rank_char = char::from(b'8' - square.row as u8);
    Ok(format!("{file_char}{rank_char}"))
}
