//! Position string for an external search engine.
//!
//! Only placement, side to move and castling rights are meaningful; the
//! en-passant, halfmove and fullmove fields are fixed placeholders.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};

pub fn generate_position_string(board: &Board, side_to_move: Color) -> String {
    let placement = generate_board_field(board);
    let side = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(board);

    format!("{placement} {side} {castling} - 0 1")
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8i8 {
        let mut empty_count = 0u8;

        for col in 0..8i8 {
            if let Some(piece) = board.get(Square::new(row, col)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece.color, piece.kind));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

pub(crate) fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    let base = match piece {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for (color, kingside, ch) in [
        (Color::White, true, 'K'),
        (Color::White, false, 'Q'),
        (Color::Black, true, 'k'),
        (Color::Black, false, 'q'),
    ] {
        if board.has_castling_pieces(color, kingside) {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}
