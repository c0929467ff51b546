/// Camera - passive container for a viewpoint.
///
/// Stores the camera's world transform and its projection. The view
/// matrix handed to the render list is the inverse of the world
/// transform. Projections are expected in OpenGL clip space (depth in
/// [-1, 1]), which is what the frustum extraction assumes.

use glam::{Mat4, Vec3};
use super::frustum::Frustum;

/// A named viewpoint with a world transform and a projection.
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,
    world_transform: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a camera from its world transform and projection.
    pub fn new(name: impl Into<String>, world_transform: Mat4, projection: Mat4) -> Self {
        Self {
            name: name.into(),
            world_transform,
            projection_matrix: projection,
        }
    }

    /// Perspective camera (`fov_y_degrees`, GL depth range) placed at identity.
    pub fn perspective(
        name: impl Into<String>,
        fov_y_degrees: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::new(
            name,
            Mat4::IDENTITY,
            Mat4::perspective_rh_gl(fov_y_degrees.to_radians(), aspect_ratio, near, far),
        )
    }

    /// World transform built from a user pose: rotations about X, then Y,
    /// then Z (degrees), followed by a translation in the rotated frame.
    pub fn user_transform(x: f32, y: f32, z: f32, rx: f32, ry: f32, rz: f32) -> Mat4 {
        Mat4::from_rotation_x(rx.to_radians())
            * Mat4::from_rotation_y(ry.to_radians())
            * Mat4::from_rotation_z(rz.to_radians())
            * Mat4::from_translation(Vec3::new(x, y, z))
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Camera placement in world space.
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    /// View matrix (inverse of the world transform).
    pub fn view_matrix(&self) -> Mat4 {
        self.world_transform.inverse()
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }

    /// Frustum for the current view and projection.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    // ===== SETTERS =====

    pub fn set_world_transform(&mut self, matrix: Mat4) {
        self.world_transform = matrix;
    }

    /// Set the world transform from a user pose (see [`Camera::user_transform`]).
    pub fn set_user_transform(&mut self, x: f32, y: f32, z: f32, rx: f32, ry: f32, rz: f32) {
        self.world_transform = Self::user_transform(x, y, z, rx, ry, rz);
    }

    /// Overwrite the view matrix directly (e.g. from a headset pose).
    pub fn set_view(&mut self, view: Mat4) {
        self.world_transform = view.inverse();
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
