//! 8×8 mailbox board owning its pieces.
//!
//! Every occupied cell holds a `Piece` whose `position` mirrors the cell it
//! sits in. Cloning produces a fully independent board, which is what move
//! simulation and background searches operate on.

use tracing::warn;

use crate::game_state::chess_rules::{
    BOARD_SIZE, KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL,
};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Canonical summary of piece placement used for repetition detection.
///
/// One byte per square: zero when empty, otherwise `1 + color * 6 + kind`.
/// Side to move, castling rights and en-passant availability are not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardFingerprint([u8; 64]);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard starting layout, black on rows 0-1 and white on rows 6-7.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for col in 0..BOARD_SIZE {
            let kind = BACK_RANK_LAYOUT[col as usize];
            board.place(Piece::new(Color::Black, kind), Square::new(0, col));
            board.place(Piece::new(Color::Black, PieceKind::Pawn), Square::new(1, col));
            board.place(Piece::new(Color::White, PieceKind::Pawn), Square::new(6, col));
            board.place(Piece::new(Color::White, kind), Square::new(7, col));
        }
        board
    }

    #[inline]
    pub fn is_inside(&self, square: Square) -> bool {
        square.is_on_board()
    }

    /// Put `piece` on `square`, replacing any occupant, and record the square
    /// on the piece. Off-board squares are ignored.
    pub fn place(&mut self, mut piece: Piece, square: Square) {
        if !self.is_inside(square) {
            warn!(?square, "refusing to place piece off the board");
            return;
        }
        piece.position = square;
        self.cells[square.row as usize][square.col as usize] = Some(piece);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        if !self.is_inside(square) {
            return None;
        }
        self.cells[square.row as usize][square.col as usize].take()
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        if !self.is_inside(square) {
            return None;
        }
        self.cells[square.row as usize][square.col as usize].as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, square: Square) -> Option<&mut Piece> {
        if !self.is_inside(square) {
            return None;
        }
        self.cells[square.row as usize][square.col as usize].as_mut()
    }

    /// True when the square holds no piece. Off-board squares hold nothing.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.position)
    }

    /// True when `color` still has an unmoved king and the unmoved rook of
    /// the given side on their original squares.
    pub fn has_castling_pieces(&self, color: Color, kingside: bool) -> bool {
        let rank = color.back_rank();
        let rook_col = if kingside {
            KINGSIDE_ROOK_COL
        } else {
            QUEENSIDE_ROOK_COL
        };
        let unmoved = |square: Square, kind: PieceKind| {
            self.get(square)
                .is_some_and(|p| p.color == color && p.kind == kind && !p.has_moved)
        };
        unmoved(Square::new(rank, KING_START_COL), PieceKind::King)
            && unmoved(Square::new(rank, rook_col), PieceKind::Rook)
    }

    pub fn fingerprint(&self) -> BoardFingerprint {
        let mut out = [0u8; 64];
        for piece in self.pieces() {
            let idx = (piece.position.row as usize) * 8 + piece.position.col as usize;
            out[idx] = 1 + (piece.color.index() * 6 + piece.kind.index()) as u8;
        }
        BoardFingerprint(out)
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

    #[test]
    fn standard_layout_places_kings_on_e_file() {
        let board = Board::standard();
        assert_eq!(board.find_king(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.find_king(Color::Black), Some(Square::new(0, 4)));
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn place_records_position_and_remove_clears() {
        let mut board = Board::empty();
        let square = Square::new(3, 5);
        board.place(Piece::new(Color::White, PieceKind::Knight), square);

        let placed = board.get(square).expect("knight should be placed");
        assert_eq!(placed.position, square);
        assert!(!board.is_empty(square));

        let removed = board.remove(square).expect("knight should be removed");
        assert_eq!(removed.kind, PieceKind::Knight);
        assert!(board.is_empty(square));
    }

    #[test]
    fn off_board_access_is_harmless() {
        let mut board = Board::empty();
        let outside = Square::new(8, 0);
        assert!(!board.is_inside(outside));
        board.place(Piece::new(Color::Black, PieceKind::Rook), outside);
        assert_eq!(board.pieces().count(), 0);
        assert!(board.get(Square::new(-1, 3)).is_none());
        assert!(board.remove(outside).is_none());
    }

    #[test]
    fn clones_are_independent() {
        let original = Board::standard();
        let mut copy = original.clone();
        copy.remove(Square::new(6, 4));
        assert!(original.get(Square::new(6, 4)).is_some());
        assert_ne!(original.fingerprint(), copy.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_moved_flags() {
        let board = Board::standard();
        let mut flagged = board.clone();
        if let Some(king) = flagged.get_mut(Square::new(7, 4)) {
            king.has_moved = true;
        }
        assert_eq!(board.fingerprint(), flagged.fingerprint());
    }

    #[test]
    fn missing_king_is_none() {
        assert_eq!(Board::empty().find_king(Color::White), None);
    }
}
