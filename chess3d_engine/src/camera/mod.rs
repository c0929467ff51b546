//! Camera module - camera matrices and frustum culling.
//!
//! Cameras are passive: the caller (or the engine frame driver) sets
//! their transforms; the render list only reads the view and projection.

mod camera;
mod frustum;
mod rig;

pub use camera::Camera;
pub use rig::{CameraRig, WHITE_SIDE_OFFSET, BLACK_SIDE_OFFSET};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
