//! Core value types shared by the board, move rules, and the game state machine.
//!
//! Squares use a fixed orientation: row 0 is black's back rank and row 7 is
//! white's back rank. White pawns advance toward row 0.

use serde::{Deserialize, Serialize};

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

/// Side of a piece, and side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn advance for this side.
    #[inline]
    pub const fn forward_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at game start.
    #[inline]
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row from which this side's pawns may advance two squares.
    #[inline]
    pub const fn pawn_start_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        self.opposite().back_rank()
    }
}

/// Piece kind (color is represented separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Narrow an arbitrary kind to a legal promotion choice.
    ///
    /// Pawns and kings are not valid replacements and become queens.
    #[inline]
    pub const fn promotion_choice(self) -> Self {
        match self {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => self,
            PieceKind::Pawn | PieceKind::King => PieceKind::Queen,
        }
    }

    /// Parse a promotion choice by name or letter, defaulting to queen.
    pub fn from_promotion_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "knight" | "n" => PieceKind::Knight,
            "bishop" | "b" => PieceKind::Bishop,
            "rook" | "r" => PieceKind::Rook,
            _ => PieceKind::Queen,
        }
    }
}

/// Board coordinate. Values outside `0..8` are representable so that callers
/// can probe off-board offsets; `Board::is_inside` decides validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// Shift by a row/column delta, returning `None` when the result leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let next = Square::new(self.row + d_row, self.col + d_col);
        if next.is_on_board() {
            Some(next)
        } else {
            None
        }
    }
}

/// A piece as it stands on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub position: Square,
    pub has_moved: bool,
}

impl Piece {
    /// A fresh, unmoved piece. The position is set when the piece is placed.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            position: Square::new(0, 0),
            has_moved: false,
        }
    }

    #[inline]
    pub const fn forward_direction(&self) -> i8 {
        self.color.forward_direction()
    }
}

/// The most recently applied move. `piece` is the mover as it stood after
/// landing, before any promotion replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

impl MoveRecord {
    /// True when this record is a pawn advancing two ranks.
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && (self.to.row - self.from.row).abs() == 2
    }
}

/// A pawn waiting on the far rank for its replacement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub color: Color,
    pub square: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    Repetition,
    InsufficientMaterial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub reason: EndReason,
    pub winner: Option<Color>,
}
