//! Board coordinates and the starting layout encoded in scene node names.
//!
//! Piece nodes are named `p_<color>_<kind><n>`, e.g. `p_white_pawn3` or
//! `p_black_rook1`. The name alone decides the piece's starting square.

use std::fmt;
use std::sync::OnceLock;
use regex::Regex;

/// Board edge length in cells
pub const BOARD_SIZE: u8 = 8;

/// A cell of the 8x8 grid. Row 0 is the white back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// `None` when either coordinate is off the board
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Neighbor one column to the left
    pub fn left(self) -> Option<Self> {
        self.col.checked_sub(1).and_then(|col| Self::new(self.row, col))
    }

    /// Neighbor one column to the right
    pub fn right(self) -> Option<Self> {
        Self::new(self.row, self.col + 1)
    }

    /// Neighbor one row up (towards black)
    pub fn up(self) -> Option<Self> {
        Self::new(self.row + 1, self.col)
    }

    /// Neighbor one row down (towards white)
    pub fn down(self) -> Option<Self> {
        self.row.checked_sub(1).and_then(|row| Self::new(row, self.col))
    }

    pub(crate) fn index(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Black,
    White,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::Black => PieceColor::White,
            PieceColor::White => PieceColor::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Pawn,
}

/// What a piece node name encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceName {
    pub color: PieceColor,
    pub kind: PieceKind,
    /// Trailing number, 0 when absent
    pub number: u32,
}

impl PieceName {
    /// Cell the piece starts on.
    ///
    /// Rooks, knights and bishops numbered 1 take the queen-side cell for
    /// white; black mirrors rooks and bishops. Pawns use `number - 1` as
    /// column, so unnumbered or out-of-range pawns have no square.
    pub fn starting_square(&self) -> Option<Square> {
        let first = self.number == 1;
        let (row, col) = match (self.color, self.kind) {
            (PieceColor::White, PieceKind::Rook) => (0, if first { 0 } else { 7 }),
            (PieceColor::Black, PieceKind::Rook) => (7, if first { 7 } else { 0 }),
            (PieceColor::White, PieceKind::Knight) => (0, if first { 1 } else { 6 }),
            (PieceColor::Black, PieceKind::Knight) => (7, if first { 1 } else { 6 }),
            (PieceColor::White, PieceKind::Bishop) => (0, if first { 2 } else { 5 }),
            (PieceColor::Black, PieceKind::Bishop) => (7, if first { 5 } else { 2 }),
            (PieceColor::White, PieceKind::Queen) => (0, 4),
            (PieceColor::Black, PieceKind::Queen) => (7, 4),
            (PieceColor::White, PieceKind::King) => (0, 3),
            (PieceColor::Black, PieceKind::King) => (7, 3),
            (PieceColor::White, PieceKind::Pawn) => (1, pawn_column(self.number)?),
            (PieceColor::Black, PieceKind::Pawn) => (6, pawn_column(self.number)?),
        };
        Square::new(row, col)
    }
}

fn pawn_column(number: u32) -> Option<u8> {
    number.checked_sub(1).and_then(|col| u8::try_from(col).ok())
}

fn piece_name_regex() -> Option<&'static Regex> {
    static PIECE_NAME: OnceLock<Option<Regex>> = OnceLock::new();
    PIECE_NAME
        .get_or_init(|| Regex::new(r"^p_(white|black)_(rook|horse|bishop|queen|king|pawn)([0-9]*)$").ok())
        .as_ref()
}

/// Parse a piece node name. `None` for anything that is not a piece.
pub fn parse_piece_name(name: &str) -> Option<PieceName> {
    let captures = piece_name_regex()?.captures(name)?;

    let color = match &captures[1] {
        "white" => PieceColor::White,
        _ => PieceColor::Black,
    };
    let kind = match &captures[2] {
        "rook" => PieceKind::Rook,
        "horse" => PieceKind::Knight,
        "bishop" => PieceKind::Bishop,
        "queen" => PieceKind::Queen,
        "king" => PieceKind::King,
        _ => PieceKind::Pawn,
    };
    let number = match &captures[3] {
        "" => 0,
        digits => digits.parse().ok()?,
    };

    Some(PieceName { color, kind, number })
}

/// Starting square encoded in a node name
pub fn starting_square(name: &str) -> Option<Square> {
    parse_piece_name(name)?.starting_square()
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
