/*!
# Chess3D Engine

Scene graph core for the 3D chessboard demo.

The crate owns the platform-agnostic parts of the demo: a node arena with
hierarchical transforms, a light-first render list with frustum culling,
passive cameras, device pose and hand grabbing. Drawing itself happens
behind the `RenderContext` trait, scene files behind `SceneLoader`.

## Architecture

- **Scene**: arena of `Node`s addressed by `NodeKey`
- **RenderList**: lights / renderables / pickables views of a scene
- **Frustum**: six normalized planes for bounding-sphere culling
- **Camera**: world transform plus projection
- **Engine**: owns the above and drives one frame at a time
*/

// Internal modules
mod error;
mod engine;
mod utils;
pub mod log;
pub mod camera;
pub mod scene;

// Main chess3d namespace module
pub mod chess3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine and frame driver
    pub use crate::engine::Engine;

    // Cameras
    pub use crate::camera::{Camera, Frustum};

    // Id counters
    pub use crate::utils::IdAllocator;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
