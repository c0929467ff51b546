/// Frustum - six clipping planes for bounding-sphere culling.
///
/// Each plane is a Vec4 (A, B, C, D) where (A, B, C) is the unit
/// inward-pointing normal and D the signed offset. The signed distance of
/// a point P is `dot(N, P) + D`; positive values lie on the visible side.
///
/// Rebuilt from the camera's view-projection matrix whenever the render
/// list needs it; never cached across frames.

use glam::{Mat4, Vec3, Vec4};

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann row combinations, then every plane is divided by the
    /// length of its normal so distances come out in world units. Planes
    /// with a zero-length normal are left untouched.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row3 + row2
            Vec4::new(m[0][3] + m[0][2], m[1][3] + m[1][2], m[2][3] + m[2][2], m[3][3] + m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Unit normal of a plane.
    pub fn normal(&self, plane: usize) -> Vec3 {
        self.planes[plane].truncate()
    }

    /// Signed distance from `point` to a plane (positive = inside).
    pub fn distance(&self, plane: usize, point: Vec3) -> f32 {
        let p = self.planes[plane];
        p.truncate().dot(point) + p.w
    }

    /// Test a bounding sphere against all six planes.
    ///
    /// Returns `false` as soon as the center lies more than `radius` behind
    /// any plane. Conservative: spheres straddling a plane (or a corner
    /// region outside the frustum) are reported visible.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        for plane in 0..6 {
            if self.distance(plane, center) < -radius {
                return false;
            }
        }
        true
    }

    /// Test a point (sphere of radius 0).
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.intersects_sphere(point, 0.0)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
