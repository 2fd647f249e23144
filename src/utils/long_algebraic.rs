//! `<from><to>[promotion]` move text, as spoken by UCI engines and the
//! terminal front end.

use crate::errors::NotationError;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// A move as exchanged with external engines: two squares and an optional
/// promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

pub fn parse_long_algebraic(text: &str) -> Result<MoveText, NotationError> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(NotationError::InvalidMove(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(&ch) => Some(char_to_promotion(ch as char).ok_or_else(|| {
            NotationError::InvalidMove(text.to_owned())
        })?),
    };

    Ok(MoveText {
        from,
        to,
        promotion,
    })
}

pub fn format_long_algebraic(mv: &MoveText) -> Result<String, NotationError> {
    let mut out = square_to_algebraic(mv.from)?;
    out.push_str(&square_to_algebraic(mv.to)?);
    if let Some(kind) = mv.promotion {
        out.push(promotion_to_char(kind));
    }
    Ok(out)
}

fn promotion_to_char(piece_kind: PieceKind) -> char {
    match piece_kind.promotion_choice() {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
