//! Chess piece bound to a scene node.
//!
//! A piece tracks three positions: the committed square (agrees with the
//! board's occupancy grid), a temporary square moved around while a move
//! is being composed, and its starting square. The node's live transform
//! follows the temporary square; the committed transform is what
//! `reset_position` snaps back to.

use chess3d_engine::chess3d::scene::{NodeKey, Scene};
use chess3d_engine::glam::{Mat4, Vec3};
use crate::layout::{PieceColor, PieceKind, Square};

/// Index of a piece in its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

#[derive(Debug, Clone)]
pub struct Piece {
    node: NodeKey,
    name: String,
    color: PieceColor,
    kind: PieceKind,
    square: Option<Square>,
    temp_square: Option<Square>,
    start: Square,
    eliminated: bool,
    initial_transform: Mat4,
    committed_transform: Mat4,
}

impl Piece {
    /// Piece resting on `start`, with `transform` as both its initial and
    /// committed transform.
    pub fn new(
        node: NodeKey,
        name: impl Into<String>,
        color: PieceColor,
        kind: PieceKind,
        start: Square,
        transform: Mat4,
    ) -> Self {
        Self {
            node,
            name: name.into(),
            color,
            kind,
            square: Some(start),
            temp_square: Some(start),
            start,
            eliminated: false,
            initial_transform: transform,
            committed_transform: transform,
        }
    }

    // ===== ACCESSORS =====

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Committed square, `None` while eliminated
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// Square of the move being composed
    pub fn temp_square(&self) -> Option<Square> {
        self.temp_square
    }

    pub fn start_square(&self) -> Square {
        self.start
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn initial_transform(&self) -> &Mat4 {
        &self.initial_transform
    }

    /// Transform at the last confirmed position
    pub fn committed_transform(&self) -> &Mat4 {
        &self.committed_transform
    }

    /// Live node transform
    pub fn live_transform(&self, scene: &Scene) -> Mat4 {
        scene
            .node(self.node)
            .map(|n| *n.transform())
            .unwrap_or(self.committed_transform)
    }

    // ===== COMMITTED STATE =====

    /// Commit `square` (also as the temporary square) and capture the
    /// node's current transform as the committed one.
    pub fn set_new_position(&mut self, scene: &Scene, square: Option<Square>) {
        self.square = square;
        self.temp_square = square;
        self.committed_transform = self.live_transform(scene);
    }

    /// Overwrite both the committed and the live transform.
    pub fn set_new_transform(&mut self, scene: &mut Scene, transform: Mat4) {
        self.committed_transform = transform;
        scene.set_transform(self.node, transform);
    }

    // ===== PENDING MOVES =====

    pub fn move_left(&mut self, scene: &mut Scene, block_size: f32) {
        self.step(scene, Square::left, Vec3::new(-block_size, 0.0, 0.0));
    }

    pub fn move_right(&mut self, scene: &mut Scene, block_size: f32) {
        self.step(scene, Square::right, Vec3::new(block_size, 0.0, 0.0));
    }

    pub fn move_up(&mut self, scene: &mut Scene, block_size: f32) {
        self.step(scene, Square::up, Vec3::new(0.0, 0.0, block_size));
    }

    pub fn move_down(&mut self, scene: &mut Scene, block_size: f32) {
        self.step(scene, Square::down, Vec3::new(0.0, 0.0, -block_size));
    }

    /// Shift the temporary square one cell and translate the live
    /// transform in the piece's local frame. No-op at the board edge or
    /// while eliminated.
    fn step(&mut self, scene: &mut Scene, neighbor: fn(Square) -> Option<Square>, offset: Vec3) {
        if self.eliminated {
            return;
        }
        let Some(next) = self.temp_square.and_then(neighbor) else {
            return;
        };
        let transform = self.live_transform(scene) * Mat4::from_translation(offset);
        scene.set_transform(self.node, transform);
        self.temp_square = Some(next);
    }

    /// Drop the pending move: temporary square and live transform go back
    /// to the committed ones.
    pub fn reset_position(&mut self, scene: &mut Scene) {
        self.temp_square = self.square;
        scene.set_transform(self.node, self.committed_transform);
    }

    // ===== ELIMINATION =====

    /// Send the piece to cemetery slot `slot` (3 slots per row) relative
    /// to `anchor`.
    pub fn remove(&mut self, scene: &mut Scene, anchor: &Mat4, slot: u32, spacing: f32) {
        scene.set_transform(self.node, cemetery_slot(anchor, slot, spacing));
        self.set_new_position(scene, None);
        self.eliminated = true;
    }

    /// Clear the eliminated flag. Position and transform are restored by
    /// the caller.
    pub fn replace(&mut self) {
        self.eliminated = false;
    }

    /// Back to the starting square and initial transform.
    pub fn reset(&mut self, scene: &mut Scene) {
        self.square = Some(self.start);
        self.temp_square = Some(self.start);
        self.committed_transform = self.initial_transform;
        scene.set_transform(self.node, self.initial_transform);
        self.eliminated = false;
    }
}

/// World transform of cemetery slot `slot`: row `slot / 3` steps along -X,
/// column `slot % 3` along -Z.
pub fn cemetery_slot(anchor: &Mat4, slot: u32, spacing: f32) -> Mat4 {
    let row = (slot / 3) as f32;
    let col = (slot % 3) as f32;
    *anchor * Mat4::from_translation(Vec3::new(-row * spacing, 0.0, -col * spacing))
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod tests;
