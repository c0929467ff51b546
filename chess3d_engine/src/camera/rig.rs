/// Camera rig - user offset applied on top of the tracked head.
///
/// The offset accumulates keyboard-style nudges. Switching side jumps to
/// one of two fixed viewpoints; the white side also turns the rig half a
/// turn about Y so the board is seen from the other end.

use std::f32::consts::PI;
use glam::{Mat4, Vec3};
use super::camera::Camera;

/// Offset of the white-side viewpoint
pub const WHITE_SIDE_OFFSET: Vec3 = Vec3::new(0.04, -0.36, -0.31);

/// Offset of the black-side viewpoint
pub const BLACK_SIDE_OFFSET: Vec3 = Vec3::new(0.04, -0.36, 0.31);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRig {
    offset: Vec3,
    white_side: bool,
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn is_white_side(&self) -> bool {
        self.white_side
    }

    /// Add `delta` to the offset.
    pub fn move_by(&mut self, delta: Vec3) {
        self.offset += delta;
    }

    /// Flip to the other side and reset the offset to that side's viewpoint.
    pub fn switch_side(&mut self) {
        self.white_side = !self.white_side;
        self.offset = if self.white_side { WHITE_SIDE_OFFSET } else { BLACK_SIDE_OFFSET };
    }

    /// Offset translation, turned 180 degrees about Y on the white side.
    pub fn transform(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.offset);
        if self.white_side {
            translation * Mat4::from_rotation_y(PI)
        } else {
            translation
        }
    }

    /// Camera world transform: `transform() * head` when a head is
    /// tracked, otherwise the plain offset as a user transform.
    pub fn world_transform(&self, head: Option<Mat4>) -> Mat4 {
        match head {
            Some(head) => self.transform() * head,
            None => Camera::user_transform(self.offset.x, self.offset.y, self.offset.z, 0.0, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
#[path = "rig_tests.rs"]
mod tests;
