//! Side area for captured pieces.
//!
//! Each color has an anchor transform and a count of captured pieces; the
//! count is the slot the next captured piece of that color lands in.

use chess3d_engine::glam::Mat4;
use crate::layout::PieceColor;
use crate::piece::PieceId;

#[derive(Debug, Clone)]
pub struct Cemetery {
    white_anchor: Mat4,
    black_anchor: Mat4,
    white_eliminated: u32,
    black_eliminated: u32,
    /// Captured pieces of both colors, in capture order
    deleted: Vec<PieceId>,
}

impl Cemetery {
    pub fn new(white_anchor: Mat4, black_anchor: Mat4) -> Self {
        Self {
            white_anchor,
            black_anchor,
            white_eliminated: 0,
            black_eliminated: 0,
            deleted: Vec::new(),
        }
    }

    pub fn anchor(&self, color: PieceColor) -> &Mat4 {
        match color {
            PieceColor::White => &self.white_anchor,
            PieceColor::Black => &self.black_anchor,
        }
    }

    /// Captured pieces of `color` currently counted
    pub fn eliminated(&self, color: PieceColor) -> u32 {
        match color {
            PieceColor::White => self.white_eliminated,
            PieceColor::Black => self.black_eliminated,
        }
    }

    fn counter(&mut self, color: PieceColor) -> &mut u32 {
        match color {
            PieceColor::White => &mut self.white_eliminated,
            PieceColor::Black => &mut self.black_eliminated,
        }
    }

    pub fn increment(&mut self, color: PieceColor) {
        *self.counter(color) += 1;
    }

    pub fn decrement(&mut self, color: PieceColor) {
        let counter = self.counter(color);
        *counter = counter.saturating_sub(1);
    }

    pub fn add_piece(&mut self, piece: PieceId) {
        self.deleted.push(piece);
    }

    /// Remove the first occurrence of `piece`. Returns `false` if absent.
    pub fn remove_piece(&mut self, piece: PieceId) -> bool {
        match self.deleted.iter().position(|&p| p == piece) {
            Some(index) => {
                self.deleted.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn deleted_pieces(&self) -> &[PieceId] {
        &self.deleted
    }

    pub fn contains(&self, piece: PieceId) -> bool {
        self.deleted.contains(&piece)
    }

    /// Empty the deleted list and zero both counters.
    pub fn clear(&mut self) {
        self.deleted.clear();
        self.white_eliminated = 0;
        self.black_eliminated = 0;
    }
}

#[cfg(test)]
#[path = "cemetery_tests.rs"]
mod tests;
