//! FEN-to-GameState parser.
//!
//! Builds a playable game from a Forsyth-Edwards Notation string. Moved flags
//! are inferred: kings and rooks count as unmoved only when a castling right
//! covers them, and pawns only while they sit on their starting row. An
//! en-passant square becomes the double pawn push that created it.

use crate::errors::FenError;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    RulesConfig, KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, Default)]
struct CastlingFlags {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingFlags {
    fn get(&self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.white_kingside,
            (Color::White, false) => self.white_queenside,
            (Color::Black, true) => self.black_kingside,
            (Color::Black, false) => self.black_queenside,
        }
    }
}

pub fn parse_fen(fen: &str, config: RulesConfig) -> Result<GameState, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let _fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let side_to_move = parse_side_to_move(side_part)?;
    let castling = parse_castling_rights(castling_part)?;
    let mut board = parse_board(board_part)?;
    apply_moved_flags(&mut board, castling);
    let last_move = parse_en_passant(en_passant_part, side_to_move, &board)?;
    let halfmove_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| FenError::InvalidClock(halfmove_part.to_owned()))?;

    Ok(GameState::from_position(
        board,
        side_to_move,
        last_move,
        halfmove_clock,
        config,
    ))
}

fn parse_board(board_part: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPlacement(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col += empty_count as i8;
                if col > 8 {
                    return Err(FenError::InvalidPlacement(
                        "rank has too many files".to_owned(),
                    ));
                }
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or_else(|| {
                FenError::InvalidPlacement(format!("invalid piece character '{ch}'"))
            })?;

            if col >= 8 {
                return Err(FenError::InvalidPlacement(
                    "rank has too many files".to_owned(),
                ));
            }

            board.place(Piece::new(color, kind), Square::new(row as i8, col));
            col += 1;
        }

        if col != 8 {
            return Err(FenError::InvalidPlacement(
                "rank does not sum to 8 files".to_owned(),
            ));
        }
    }

    Ok(board)
}

fn apply_moved_flags(board: &mut Board, castling: CastlingFlags) {
    for row in 0..8i8 {
        for col in 0..8i8 {
            let square = Square::new(row, col);
            let Some(piece) = board.get_mut(square) else {
                continue;
            };
            let color = piece.color;
            let on_back_rank = row == color.back_rank();
            piece.has_moved = match piece.kind {
                PieceKind::Pawn => row != color.pawn_start_row(),
                PieceKind::King => {
                    !(on_back_rank
                        && col == KING_START_COL
                        && (castling.get(color, true) || castling.get(color, false)))
                }
                PieceKind::Rook => {
                    let kingside = on_back_rank && col == KINGSIDE_ROOK_COL && castling.get(color, true);
                    let queenside =
                        on_back_rank && col == QUEENSIDE_ROOK_COL && castling.get(color, false);
                    !(kingside || queenside)
                }
                PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => false,
            };
        }
    }
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingFlags, FenError> {
    let mut rights = CastlingFlags::default();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(FenError::InvalidCastling(ch)),
        }
    }

    Ok(rights)
}

/// Rebuild the double push behind an en-passant square.
fn parse_en_passant(
    en_passant_part: &str,
    side_to_move: Color,
    board: &Board,
) -> Result<Option<MoveRecord>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let invalid = || FenError::InvalidEnPassant(en_passant_part.to_owned());
    let skipped = algebraic_to_square(en_passant_part).map_err(|_| invalid())?;

    let pusher = side_to_move.opposite();
    let dir = pusher.forward_direction();
    if skipped.row != pusher.pawn_start_row() + dir {
        return Err(invalid());
    }

    let from = Square::new(skipped.row - dir, skipped.col);
    let to = Square::new(skipped.row + dir, skipped.col);
    let piece = board
        .get(to)
        .copied()
        .filter(|p| p.kind == PieceKind::Pawn && p.color == pusher)
        .ok_or_else(invalid)?;

    Ok(Some(MoveRecord { piece, from, to }))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}
