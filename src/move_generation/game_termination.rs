//! End-of-game detection: checkmate, draws, stalemate.

use crate::game_state::board::{Board, BoardFingerprint};
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::{
    Color, DrawReason, EndReason, GameOutcome, MoveRecord, PieceKind,
};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

pub fn is_checkmate(board: &Board, color: Color, last_move: Option<&MoveRecord>) -> bool {
    is_king_in_check(board, color) && !has_any_legal_move(board, color, last_move)
}

pub fn is_stalemate(board: &Board, color: Color, last_move: Option<&MoveRecord>) -> bool {
    !is_king_in_check(board, color) && !has_any_legal_move(board, color, last_move)
}

/// Neither side holds a queen, a rook, or two or more minor pieces.
///
/// This is a coarse heuristic rather than a full table of unwinnable endings.
pub fn is_insufficient_material(board: &Board, pawns_count: bool) -> bool {
    [Color::White, Color::Black]
        .into_iter()
        .all(|color| !has_mating_material(board, color, pawns_count))
}

fn has_mating_material(board: &Board, color: Color, pawns_count: bool) -> bool {
    let mut minors = 0;
    for piece in board.pieces_of(color) {
        match piece.kind {
            PieceKind::Queen | PieceKind::Rook => return true,
            PieceKind::Pawn if pawns_count => return true,
            PieceKind::Bishop | PieceKind::Knight => minors += 1,
            PieceKind::Pawn | PieceKind::King => {}
        }
    }
    minors >= 2
}

pub fn draw_reason(
    board: &Board,
    halfmove_clock: u32,
    history: &[BoardFingerprint],
    config: &RulesConfig,
) -> Option<DrawReason> {
    if halfmove_clock >= config.fifty_move_halfmoves {
        return Some(DrawReason::FiftyMoveRule);
    }

    let current = board.fingerprint();
    let occurrences = history.iter().filter(|&&fp| fp == current).count();
    if occurrences >= config.repetition_threshold {
        return Some(DrawReason::Repetition);
    }

    if is_insufficient_material(board, config.pawns_count_as_material) {
        return Some(DrawReason::InsufficientMaterial);
    }

    None
}

/// Outcome for the position where `to_move` is about to play, checked in the
/// order checkmate, draw, stalemate.
pub fn evaluate_outcome(
    board: &Board,
    to_move: Color,
    last_move: Option<&MoveRecord>,
    halfmove_clock: u32,
    history: &[BoardFingerprint],
    config: &RulesConfig,
) -> Option<GameOutcome> {
    let in_check = is_king_in_check(board, to_move);
    let can_move = has_any_legal_move(board, to_move, last_move);

    if in_check && !can_move {
        return Some(GameOutcome {
            reason: EndReason::Checkmate,
            winner: Some(to_move.opposite()),
        });
    }

    if let Some(reason) = draw_reason(board, halfmove_clock, history, config) {
        return Some(GameOutcome {
            reason: EndReason::Draw(reason),
            winner: None,
        });
    }

    if !can_move {
        return Some(GameOutcome {
            reason: EndReason::Stalemate,
            winner: None,
        });
    }

    None
}
