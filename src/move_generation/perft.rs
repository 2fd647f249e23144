//! Move-path enumeration used as a correctness oracle for the rules.
//!
//! Every legal move of the side to move is replayed on a clone of the game
//! through the same select/move protocol the interface uses. Promotions fan
//! out into the four replacement kinds. A finished game is a leaf.

use crate::game_state::chess_types::{EndReason, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::special_moves::is_promotion_move;

const PROMOTION_CHOICES: [Option<PieceKind>; 4] = [
    Some(PieceKind::Queen),
    Some(PieceKind::Rook),
    Some(PieceKind::Bishop),
    Some(PieceKind::Knight),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    if game.is_game_over() {
        return PerftCounts::default();
    }

    let mut total = PerftCounts::default();
    let board = game.board();

    for mv in game.all_legal_moves() {
        let Some(piece) = board.get(mv.from).copied() else {
            continue;
        };
        let is_en_passant =
            piece.kind == PieceKind::Pawn && mv.from.col != mv.to.col && board.is_empty(mv.to);
        let is_capture = is_en_passant || !board.is_empty(mv.to);
        let is_castle = piece.kind == PieceKind::King && (mv.to.col - mv.from.col).abs() == 2;
        let promotes = is_promotion_move(&piece, mv.to);
        let choices: &[Option<PieceKind>] = if promotes {
            &PROMOTION_CHOICES
        } else {
            &[None]
        };

        for &promotion in choices {
            let mut next = game.clone();
            next.apply_remote(mv.from, mv.to, promotion);

            if depth > 1 {
                total.merge(perft(&next, depth - 1));
                continue;
            }

            total.nodes += 1;
            total.captures += usize::from(is_capture);
            total.en_passant += usize::from(is_en_passant);
            total.castles += usize::from(is_castle);
            total.promotions += usize::from(promotes);
            let mated = next
                .outcome()
                .is_some_and(|outcome| outcome.reason == EndReason::Checkmate);
            total.checkmates += usize::from(mated);
        }
    }

    total
}
