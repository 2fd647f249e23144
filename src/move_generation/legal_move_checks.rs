//! Attack detection and the king-safety legality filter.
//!
//! Attacks are found by scanning every piece of the attacking side; there is
//! no cached attack map. Candidate moves are validated by relocating the
//! piece on a cloned board and asking whether the mover's king is attacked.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::moves::pawn_moves::pawn_capture_squares;
use crate::moves::piece_moves::pseudo_legal_targets;

/// True when any piece of `attacker_color` could move onto `square`.
///
/// Pawns contribute their forward diagonals whether or not the square is
/// occupied; a pawn push never attacks.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    board.pieces_of(attacker_color).any(|piece| attacks_square(piece, square, board))
}

fn attacks_square(piece: &Piece, square: Square, board: &Board) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_capture_squares(piece.color, piece.position).any(|to| to == square),
        _ => pseudo_legal_targets(piece, board).contains(&square),
    }
}

/// A board without a king for `color` reports "not in check".
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.find_king(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Relocate `piece` to `to` on a scratch copy and report whether its king survives.
pub fn relocation_is_safe(board: &Board, piece: &Piece, to: Square) -> bool {
    let mut scratch = board.clone();
    scratch.remove(piece.position);
    scratch.place(*piece, to);
    !is_king_in_check(&scratch, piece.color)
}

/// Keep only the candidates that do not leave the mover's king attacked.
pub fn filter_legal_targets(board: &Board, piece: &Piece, candidates: Vec<Square>) -> Vec<Square> {
    candidates
        .into_iter()
        .filter(|&to| relocation_is_safe(board, piece, to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_legal_targets, is_king_in_check, is_square_attacked};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::moves::piece_moves::pseudo_legal_targets;

    fn put(board: &mut Board, color: Color, kind: PieceKind, row: i8, col: i8) {
        board.place(Piece::new(color, kind), Square::new(row, col));
    }

    #[test]
    fn pinned_rook_may_only_slide_along_the_pin() {
        let mut board = Board::empty();
        put(&mut board, Color::White, PieceKind::King, 7, 4);
        put(&mut board, Color::White, PieceKind::Rook, 5, 4);
        put(&mut board, Color::Black, PieceKind::Rook, 1, 4);
        put(&mut board, Color::Black, PieceKind::King, 0, 0);

        let rook = *board.get(Square::new(5, 4)).expect("rook placed");
        let legal = filter_legal_targets(&board, &rook, pseudo_legal_targets(&rook, &board));

        assert!(legal.iter().all(|sq| sq.col == 4));
        assert!(legal.contains(&Square::new(1, 4)));
        assert_eq!(legal.len(), 5);
    }

    #[test]
    fn pawn_diagonals_attack_empty_squares_but_pushes_do_not() {
        let mut board = Board::empty();
        put(&mut board, Color::Black, PieceKind::Pawn, 6, 5);

        assert!(is_square_attacked(&board, Square::new(7, 4), Color::Black));
        assert!(is_square_attacked(&board, Square::new(7, 6), Color::Black));
        assert!(!is_square_attacked(&board, Square::new(7, 5), Color::Black));
    }

    #[test]
    fn missing_king_counts_as_safe() {
        let mut board = Board::empty();
        put(&mut board, Color::Black, PieceKind::Queen, 0, 0);
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn knight_gives_check() {
        let mut board = Board::empty();
        put(&mut board, Color::White, PieceKind::King, 7, 4);
        put(&mut board, Color::Black, PieceKind::Knight, 5, 5);
        assert!(is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
    }
}
