//! Move records and the undo/redo history.

use chess3d_engine::chess3d::scene::Scene;
use chess3d_engine::glam::Mat4;
use crate::layout::Square;
use crate::piece::{Piece, PieceId};

/// What a logged move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Piece moved from `start` to `end`
    Relocation,
    /// Destination held a piece of the same color; nothing changed
    Rejected,
    /// Piece was captured and sent to the cemetery
    Elimination,
}

/// Snapshot of a piece's move.
///
/// Fields are fixed at construction; only the end square and the
/// eliminated flag can be overridden, while a capture is being recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    piece: PieceId,
    kind: MoveKind,
    start: Square,
    end: Option<Square>,
    eliminated: bool,
    start_transform: Mat4,
    end_transform: Mat4,
}

impl Move {
    /// Snapshot `piece` as it is now: start is the committed square, end
    /// the temporary one, start transform the committed transform and end
    /// transform the live one.
    ///
    /// `None` when the piece has no committed square (eliminated).
    pub fn snapshot(id: PieceId, piece: &Piece, scene: &Scene, kind: MoveKind) -> Option<Self> {
        Some(Self {
            piece: id,
            kind,
            start: piece.square()?,
            end: piece.temp_square(),
            eliminated: piece.is_eliminated(),
            start_transform: *piece.committed_transform(),
            end_transform: piece.live_transform(scene),
        })
    }

    pub fn piece(&self) -> PieceId {
        self.piece
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn start(&self) -> Square {
        self.start
    }

    pub fn end(&self) -> Option<Square> {
        self.end
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn start_transform(&self) -> &Mat4 {
        &self.start_transform
    }

    pub fn end_transform(&self) -> &Mat4 {
        &self.end_transform
    }

    pub fn set_end_position(&mut self, end: Option<Square>) {
        self.end = end;
    }

    pub fn set_eliminated(&mut self, eliminated: bool) {
        self.eliminated = eliminated;
    }
}

/// Linear move log with a cursor on the last applied move.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    moves: Vec<Move>,
    cursor: Option<usize>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move, discarding everything after the cursor.
    pub fn push(&mut self, mv: Move) {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.moves.len() => {
                self.moves.truncate(cursor + 1);
            }
            // Everything was undone: the whole log is stale
            None if !self.moves.is_empty() => {
                self.moves.clear();
            }
            _ => {}
        }
        self.moves.push(mv);
        self.cursor = Some(self.cursor.map_or(0, |cursor| cursor + 1));
    }

    /// Move under the cursor
    pub fn current(&self) -> Option<&Move> {
        self.cursor.and_then(|cursor| self.moves.get(cursor))
    }

    /// Move right after the cursor
    pub fn peek_next(&self) -> Option<&Move> {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        self.moves.get(next)
    }

    /// Step the cursor back one move. Returns the move it left.
    pub fn retreat(&mut self) -> Option<Move> {
        let cursor = self.cursor?;
        let mv = self.moves.get(cursor).copied();
        self.cursor = cursor.checked_sub(1);
        mv
    }

    /// Step the cursor forward one move. Returns the move it lands on.
    pub fn advance(&mut self) -> Option<Move> {
        let mv = self.peek_next().copied()?;
        self.cursor = Some(self.cursor.map_or(0, |cursor| cursor + 1));
        Some(mv)
    }

    /// Index of the last applied move, `None` before the first one
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.peek_next().is_some()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod tests;
