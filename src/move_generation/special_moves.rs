//! Castling, en passant and promotion rules layered on top of the
//! pseudo-legal generators.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::{MoveRecord, Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};

struct CastlingSide {
    rook_col: i8,
    /// Squares strictly between king and rook.
    between: &'static [i8],
    /// Squares the king crosses and lands on.
    king_path: &'static [i8],
    king_to_col: i8,
}

const KINGSIDE: CastlingSide = CastlingSide {
    rook_col: KINGSIDE_ROOK_COL,
    between: &[5, 6],
    king_path: &[5, 6],
    king_to_col: 6,
};

const QUEENSIDE: CastlingSide = CastlingSide {
    rook_col: QUEENSIDE_ROOK_COL,
    between: &[1, 2, 3],
    king_path: &[3, 2],
    king_to_col: 2,
};

/// Extra king targets granted by castling (zero, one or two squares).
pub fn castling_targets(board: &Board, king: &Piece) -> Vec<Square> {
    let mut out = Vec::new();
    if king.kind != PieceKind::King || king.has_moved {
        return out;
    }

    let rank = king.color.back_rank();
    if king.position != Square::new(rank, KING_START_COL) {
        return out;
    }

    let enemy = king.color.opposite();
    if is_square_attacked(board, king.position, enemy) {
        return out;
    }

    for side in [&KINGSIDE, &QUEENSIDE] {
        let rook_ready = board
            .get(Square::new(rank, side.rook_col))
            .is_some_and(|rook| {
                rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
            });
        if !rook_ready {
            continue;
        }

        if !side
            .between
            .iter()
            .all(|&col| board.is_empty(Square::new(rank, col)))
        {
            continue;
        }

        if side
            .king_path
            .iter()
            .any(|&col| is_square_attacked(board, Square::new(rank, col), enemy))
        {
            continue;
        }

        out.push(Square::new(rank, side.king_to_col));
    }

    out
}

/// Rook relocation `(from, to)` for a king move that castles, if it does.
pub fn castling_rook_move(king: &Piece, from: Square, to: Square) -> Option<(Square, Square)> {
    if king.kind != PieceKind::King || from.row != to.row || (to.col - from.col).abs() != 2 {
        return None;
    }
    let rank = from.row;
    if to.col > from.col {
        Some((
            Square::new(rank, KINGSIDE_ROOK_COL),
            Square::new(rank, KING_START_COL + 1),
        ))
    } else {
        Some((
            Square::new(rank, QUEENSIDE_ROOK_COL),
            Square::new(rank, KING_START_COL - 1),
        ))
    }
}

/// The en-passant capture square available to `pawn`, derived from the last move.
///
/// Offered only when the capture, which also removes the passed pawn, leaves
/// the capturer's king safe.
pub fn en_passant_target(
    board: &Board,
    pawn: &Piece,
    last_move: Option<&MoveRecord>,
) -> Option<Square> {
    if pawn.kind != PieceKind::Pawn {
        return None;
    }
    let last = last_move?;
    if !last.is_double_pawn_push() || last.piece.color == pawn.color {
        return None;
    }
    if last.to.row != pawn.position.row || (last.to.col - pawn.position.col).abs() != 1 {
        return None;
    }
    let passed_is_there = board
        .get(last.to)
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != pawn.color);
    if !passed_is_there {
        return None;
    }

    let target = pawn.position.offset(pawn.forward_direction(), 0)?;
    let target = Square::new(target.row, last.to.col);
    if !board.is_empty(target) {
        return None;
    }

    let mut scratch = board.clone();
    scratch.remove(pawn.position);
    scratch.remove(last.to);
    scratch.place(*pawn, target);
    if is_king_in_check(&scratch, pawn.color) {
        return None;
    }

    Some(target)
}

/// True when `piece` arriving on `to` must promote.
#[inline]
pub fn is_promotion_move(piece: &Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row()
}

#[cfg(test)]
mod tests {
    use super::{castling_targets, en_passant_target, is_promotion_move};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, MoveRecord, Piece, PieceKind, Square};

    fn put(board: &mut Board, color: Color, kind: PieceKind, row: i8, col: i8) {
        board.place(Piece::new(color, kind), Square::new(row, col));
    }

    fn castling_board() -> Board {
        let mut board = Board::empty();
        put(&mut board, Color::White, PieceKind::King, 7, 4);
        put(&mut board, Color::White, PieceKind::Rook, 7, 0);
        put(&mut board, Color::White, PieceKind::Rook, 7, 7);
        put(&mut board, Color::Black, PieceKind::King, 0, 4);
        board
    }

    #[test]
    fn both_sides_castle_on_open_rank() {
        let board = castling_board();
        let king = *board.get(Square::new(7, 4)).expect("king placed");
        let targets = castling_targets(&board, &king);
        assert_eq!(targets, vec![Square::new(7, 6), Square::new(7, 2)]);
    }

    #[test]
    fn attacked_path_blocks_only_that_side() {
        let mut board = castling_board();
        put(&mut board, Color::Black, PieceKind::Rook, 2, 5);
        let king = *board.get(Square::new(7, 4)).expect("king placed");
        assert_eq!(castling_targets(&board, &king), vec![Square::new(7, 2)]);
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        let mut board = castling_board();
        put(&mut board, Color::Black, PieceKind::Rook, 2, 1);
        let king = *board.get(Square::new(7, 4)).expect("king placed");
        assert_eq!(
            castling_targets(&board, &king),
            vec![Square::new(7, 6), Square::new(7, 2)]
        );
    }

    #[test]
    fn no_castling_out_of_check_or_after_rook_moved() {
        let mut board = castling_board();
        put(&mut board, Color::Black, PieceKind::Rook, 3, 4);
        let king = *board.get(Square::new(7, 4)).expect("king placed");
        assert!(castling_targets(&board, &king).is_empty());

        let mut board = castling_board();
        let mut rook = board.remove(Square::new(7, 7)).expect("rook placed");
        rook.has_moved = true;
        board.place(rook, Square::new(7, 7));
        let king = *board.get(Square::new(7, 4)).expect("king placed");
        assert_eq!(castling_targets(&board, &king), vec![Square::new(7, 2)]);
    }

    #[test]
    fn en_passant_follows_double_push_only() {
        let mut board = Board::empty();
        put(&mut board, Color::White, PieceKind::King, 7, 4);
        put(&mut board, Color::Black, PieceKind::King, 0, 4);
        put(&mut board, Color::White, PieceKind::Pawn, 3, 4);
        put(&mut board, Color::Black, PieceKind::Pawn, 3, 3);
        let white_pawn = *board.get(Square::new(3, 4)).expect("pawn placed");
        let black_pawn = *board.get(Square::new(3, 3)).expect("pawn placed");

        let double = MoveRecord {
            piece: black_pawn,
            from: Square::new(1, 3),
            to: Square::new(3, 3),
        };
        assert_eq!(
            en_passant_target(&board, &white_pawn, Some(&double)),
            Some(Square::new(2, 3))
        );

        let single = MoveRecord {
            piece: black_pawn,
            from: Square::new(2, 3),
            to: Square::new(3, 3),
        };
        assert_eq!(en_passant_target(&board, &white_pawn, Some(&single)), None);
        assert_eq!(en_passant_target(&board, &white_pawn, None), None);
    }

    #[test]
    fn en_passant_rejected_when_it_exposes_the_king() {
        let mut board = Board::empty();
        put(&mut board, Color::White, PieceKind::King, 3, 0);
        put(&mut board, Color::White, PieceKind::Pawn, 3, 1);
        put(&mut board, Color::Black, PieceKind::Pawn, 3, 2);
        put(&mut board, Color::Black, PieceKind::Rook, 3, 7);
        put(&mut board, Color::Black, PieceKind::King, 0, 7);
        let white_pawn = *board.get(Square::new(3, 1)).expect("pawn placed");
        let black_pawn = *board.get(Square::new(3, 2)).expect("pawn placed");
        let double = MoveRecord {
            piece: black_pawn,
            from: Square::new(1, 2),
            to: Square::new(3, 2),
        };
        assert_eq!(en_passant_target(&board, &white_pawn, Some(&double)), None);
    }

    #[test]
    fn pawns_promote_on_the_far_rank() {
        let white = Piece::new(Color::White, PieceKind::Pawn);
        let black = Piece::new(Color::Black, PieceKind::Pawn);
        assert!(is_promotion_move(&white, Square::new(0, 3)));
        assert!(!is_promotion_move(&white, Square::new(7, 3)));
        assert!(is_promotion_move(&black, Square::new(7, 3)));
    }
}
